//! Server-rendered dashboard pages. Data failures render an error page
//! instead of an error status.

use actix_web::web;
use maud::Markup;

use packblog_core::DomainError;
use packblog_core::domain::{BlogQuery, VISITOR_LIST_LIMIT, VisitorQuery, tally_by_country};
use packblog_shared::dto::{BlogListParams, VisitorListParams};

use super::blogs::parse_id;
use crate::state::AppState;
use crate::views;
use crate::views::visitors::VisitorsPage;

/// GET /dashboard/blogs?search=&status=
pub async fn blogs(state: web::Data<AppState>, params: web::Query<BlogListParams>) -> Markup {
    let query = BlogQuery::new(params.search.as_deref(), params.status.as_deref());
    match state.blogs.list(&query).await {
        Ok(blogs) => views::dashboard::blog_table(&blogs, &query),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load blog table");
            views::dashboard::error_page("Failed to fetch blogs")
        }
    }
}

/// GET /dashboard/blogs/new
pub async fn new_blog() -> Markup {
    views::dashboard::blog_form(None)
}

/// GET /dashboard/blogs/{id}/edit
pub async fn edit_blog(state: web::Data<AppState>, path: web::Path<String>) -> Markup {
    let Ok(id) = parse_id(&path) else {
        return views::dashboard::not_found_page();
    };

    match state.blogs.get(id).await {
        Ok(blog) => views::dashboard::blog_form(Some(&blog)),
        Err(DomainError::NotFound { .. }) => views::dashboard::not_found_page(),
        Err(e) => {
            tracing::error!(blog_id = %id, error = %e, "Failed to load blog for editing");
            views::dashboard::error_page("Failed to fetch blog")
        }
    }
}

/// GET /dashboard/visitors?country=
pub async fn visitors(
    state: web::Data<AppState>,
    params: web::Query<VisitorListParams>,
) -> Markup {
    let query = VisitorQuery::new(params.country.as_deref());

    let loaded = async {
        let visitors = state.visitors.list(&query, VISITOR_LIST_LIMIT).await?;
        let countries = state.visitors.countries().await?;
        let stats = state.visitors.stats().await?;
        Ok::<_, packblog_core::RepoError>((visitors, countries, stats))
    }
    .await;

    match loaded {
        Ok((visitors, countries, stats)) => {
            // The breakdown is only meaningful across all countries.
            let breakdown = query
                .country
                .is_none()
                .then(|| tally_by_country(&visitors));
            views::visitors::visitors_page(&VisitorsPage {
                selected_country: query.country.as_deref(),
                countries: &countries,
                stats,
                breakdown: breakdown.as_deref(),
                visitors: &visitors,
            })
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load visitors dashboard");
            views::dashboard::error_page("Failed to fetch visitors")
        }
    }
}
