//! Visitor analytics queries.

use actix_web::{HttpResponse, web};

use packblog_core::domain::{VISITOR_LIST_LIMIT, VisitorQuery};
use packblog_shared::ApiResponse;
use packblog_shared::dto::{CountriesResponse, VisitorListParams, VisitorListResponse};

use crate::middleware::error::{AppResult, ErrorContext};
use crate::state::AppState;

/// GET /api/visitors?country=
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<VisitorListParams>,
) -> AppResult<HttpResponse> {
    let query = VisitorQuery::new(params.country.as_deref());
    let visitors = state
        .visitors
        .list(&query, VISITOR_LIST_LIMIT)
        .await
        .context("Failed to fetch visitors")?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(VisitorListResponse {
        total: visitors.len(),
        visitors,
    })))
}

/// GET /api/visitors/countries
pub async fn countries(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let countries = state
        .visitors
        .countries()
        .await
        .context("Failed to fetch countries")?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(CountriesResponse { countries })))
}

/// GET /api/visitors/stats
pub async fn stats(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let stats = state
        .visitors
        .stats()
        .await
        .context("Failed to fetch visitor stats")?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats)))
}
