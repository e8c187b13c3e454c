//! Public blog reading: the rendered post page and its JSON twin.

use actix_web::{HttpResponse, web};
use maud::Markup;

use packblog_shared::ApiResponse;
use packblog_shared::dto::PublicBlogResponse;

use crate::middleware::error::{AppError, AppResult, ErrorContext};
use crate::state::AppState;
use crate::views;

/// GET /blogs/{slug}
///
/// Always answers 200: the post, a not-found page or an error page.
pub async fn blog_page(state: web::Data<AppState>, path: web::Path<String>) -> Markup {
    match state.blogs.read_published(&path).await {
        Ok(Some(post)) => views::blog::post_page(&post),
        Ok(None) => views::blog::not_found_page(),
        Err(e) => {
            tracing::error!(slug = %path, error = %e, "Failed to load blog page");
            views::blog::error_page()
        }
    }
}

/// GET /api/public/blogs/{slug}
pub async fn get_by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state
        .blogs
        .read_published(&path)
        .await
        .context("Failed to fetch blog")?
        .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PublicBlogResponse {
        blog: post.blog,
        related: post.related,
    })))
}
