//! Blog CRUD for the dashboard.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use packblog_core::domain::BlogQuery;
use packblog_shared::ApiResponse;
use packblog_shared::dto::{BlogListParams, PublishRequest};

use super::form::BlogForm;
use crate::middleware::error::{AppError, AppResult, ErrorContext};
use crate::state::AppState;

/// GET /api/blogs?search=&status=
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<BlogListParams>,
) -> AppResult<HttpResponse> {
    let query = BlogQuery::new(params.search.as_deref(), params.status.as_deref());
    let blogs = state
        .blogs
        .list(&query)
        .await
        .context("Failed to fetch blogs")?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(blogs)))
}

/// GET /api/blogs/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let blog = state.blogs.get(id).await.context("Failed to fetch blog")?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(blog)))
}

/// POST /api/blogs (multipart)
pub async fn create(state: web::Data<AppState>, payload: Multipart) -> AppResult<HttpResponse> {
    let form = BlogForm::from_multipart(payload, state.max_upload_bytes).await?;
    let (draft, cover) = form.into_draft();

    let saved = state
        .blogs
        .create(draft, cover)
        .await
        .context("Failed to create blog")?;

    let message = with_notice("Blog created successfully", saved.cover_notice);
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(saved.blog, message)))
}

/// PUT /api/blogs/{id} (multipart)
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let form = BlogForm::from_multipart(payload, state.max_upload_bytes).await?;
    let (patch, cover) = form.into_patch();

    let saved = state
        .blogs
        .update(id, patch, cover)
        .await
        .context("Failed to update blog")?;

    let message = with_notice("Blog updated successfully", saved.cover_notice);
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(saved.blog, message)))
}

/// DELETE /api/blogs/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    state
        .blogs
        .delete(id)
        .await
        .context("Failed to delete blog")?;

    Ok(HttpResponse::Ok().json(ApiResponse::message_only("Blog deleted successfully")))
}

/// PUT /api/blogs/{id}/publish
pub async fn publish(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PublishRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let published = body.published;
    let blog = state
        .blogs
        .set_published(id, published)
        .await
        .context("Failed to update blog status")?;

    let message = if published {
        "Blog published successfully"
    } else {
        "Blog unpublished successfully"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(blog, message)))
}

/// A malformed id cannot name a stored blog.
pub(crate) fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Blog not found".to_string()))
}

fn with_notice(message: &str, notice: Option<String>) -> String {
    match notice {
        Some(notice) => format!("{message} ({notice})"),
        None => message.to_string(),
    }
}
