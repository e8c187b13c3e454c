//! Request and response bodies for the JSON API.

use serde::{Deserialize, Serialize};

use packblog_core::domain::{Blog, BlogSummary, Visitor};

/// Body of `PUT /api/blogs/{id}/publish`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    pub published: bool,
}

/// Query string of the blog list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogListParams {
    pub search: Option<String>,
    pub status: Option<String>,
}

/// Query string of the visitor list. `all` or empty means no filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisitorListParams {
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitorListResponse {
    pub visitors: Vec<Visitor>,
    /// Number of visitors returned, not the collection size.
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountriesResponse {
    pub countries: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicBlogResponse {
    pub blog: Blog,
    pub related: Vec<BlogSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}
