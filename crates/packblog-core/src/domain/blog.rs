use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

pub const DEFAULT_AUTHOR: &str = "Admin";
pub const DEFAULT_READ_TIME: i32 = 5;
pub const TITLE_MAX_CHARS: usize = 200;
pub const EXCERPT_MAX_CHARS: usize = 300;

/// Externally hosted cover image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverImage {
    pub public_id: String,
    pub url: String,
}

/// Blog entity - a post managed from the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<CoverImage>,
    pub author: String,
    pub tags: Vec<String>,
    pub published: bool,
    pub featured: bool,
    pub read_time: i32,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Create a new blog from a validated draft.
    pub fn new(draft: BlogDraft, slug: String, cover_image: Option<CoverImage>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            slug,
            excerpt: draft.excerpt,
            content: draft.content,
            cover_image,
            author: draft.author,
            tags: draft.tags,
            published: draft.published,
            featured: draft.featured,
            read_time: draft.read_time,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn summary(&self) -> BlogSummary {
        BlogSummary {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            excerpt: self.excerpt.clone(),
            cover_image: self.cover_image.clone(),
            author: self.author.clone(),
            tags: self.tags.clone(),
            published: self.published,
            featured: self.featured,
            read_time: self.read_time,
            views: self.views,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn shares_tag_with(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }

    /// Case-insensitive substring match over title and excerpt.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.excerpt.to_lowercase().contains(&needle)
    }
}

/// A blog without its content body, for listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub cover_image: Option<CoverImage>,
    pub author: String,
    pub tags: Vec<String>,
    pub published: bool,
    pub featured: bool,
    pub read_time: i32,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for a new blog, already trimmed and defaulted.
#[derive(Debug, Clone)]
pub struct BlogDraft {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
    pub published: bool,
    pub featured: bool,
    pub read_time: i32,
}

impl BlogDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty()
            || self.excerpt.trim().is_empty()
            || self.content.trim().is_empty()
        {
            return Err(DomainError::Validation(
                "Title, excerpt, and content are required".to_string(),
            ));
        }
        validate_lengths(&self.title, &self.excerpt)
    }
}

pub(crate) fn validate_lengths(title: &str, excerpt: &str) -> Result<(), DomainError> {
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(DomainError::Validation(format!(
            "Title must be at most {TITLE_MAX_CHARS} characters"
        )));
    }
    if excerpt.chars().count() > EXCERPT_MAX_CHARS {
        return Err(DomainError::Validation(format!(
            "Excerpt must be at most {EXCERPT_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

/// Partial update of a blog. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub read_time: Option<i32>,
}

/// Publication filter for dashboard listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    #[default]
    All,
    Published,
    Draft,
}

impl BlogStatus {
    /// Unknown values behave as `All`.
    pub fn parse(value: &str) -> Self {
        match value {
            "published" => Self::Published,
            "draft" => Self::Draft,
            _ => Self::All,
        }
    }

    pub fn published_filter(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Published => Some(true),
            Self::Draft => Some(false),
        }
    }
}

/// Dashboard listing query.
#[derive(Debug, Clone, Default)]
pub struct BlogQuery {
    pub search: Option<String>,
    pub status: BlogStatus,
}

impl BlogQuery {
    pub fn new(search: Option<&str>, status: Option<&str>) -> Self {
        Self {
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            status: status.map(BlogStatus::parse).unwrap_or_default(),
        }
    }

    pub fn matches(&self, blog: &Blog) -> bool {
        let status_ok = self
            .status
            .published_filter()
            .is_none_or(|published| blog.published == published);
        let search_ok = self
            .search
            .as_deref()
            .is_none_or(|needle| blog.matches_search(needle));
        status_ok && search_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, excerpt: &str, content: &str) -> BlogDraft {
        BlogDraft {
            title: title.to_string(),
            excerpt: excerpt.to_string(),
            content: content.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            tags: vec![],
            published: false,
            featured: false,
            read_time: DEFAULT_READ_TIME,
        }
    }

    #[test]
    fn test_draft_requires_title_excerpt_content() {
        assert!(draft("T", "E", "C").validate().is_ok());
        for d in [draft("", "E", "C"), draft("T", "  ", "C"), draft("T", "E", "\n")] {
            assert!(matches!(d.validate(), Err(DomainError::Validation(_))));
        }
    }

    #[test]
    fn test_draft_enforces_lengths() {
        let long_title = "x".repeat(TITLE_MAX_CHARS + 1);
        assert!(draft(&long_title, "E", "C").validate().is_err());
        assert!(draft(&"x".repeat(TITLE_MAX_CHARS), "E", "C").validate().is_ok());

        let long_excerpt = "é".repeat(EXCERPT_MAX_CHARS + 1);
        assert!(draft("T", &long_excerpt, "C").validate().is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(BlogStatus::parse("published"), BlogStatus::Published);
        assert_eq!(BlogStatus::parse("draft"), BlogStatus::Draft);
        assert_eq!(BlogStatus::parse("all"), BlogStatus::All);
        assert_eq!(BlogStatus::parse("bogus"), BlogStatus::All);
    }

    #[test]
    fn test_query_matches_search_and_status() {
        let mut blog = Blog::new(
            draft("Kraft Mailer Boxes", "Eco friendly", "C"),
            "kraft-mailer-boxes-000001".to_string(),
            None,
        );

        let query = BlogQuery::new(Some("MAILER"), Some("draft"));
        assert!(query.matches(&blog));

        let query = BlogQuery::new(Some("eco"), None);
        assert!(query.matches(&blog));

        let query = BlogQuery::new(None, Some("published"));
        assert!(!query.matches(&blog));

        blog.published = true;
        assert!(query.matches(&blog));

        let query = BlogQuery::new(Some("rigid"), None);
        assert!(!query.matches(&blog));
    }

    #[test]
    fn test_blog_serializes_camel_case() {
        let blog = Blog::new(draft("T", "E", "C"), "t-000001".to_string(), None);
        let json = serde_json::to_value(&blog).unwrap();
        assert_eq!(json["readTime"], 5);
        assert_eq!(json["author"], "Admin");
        assert!(json.get("coverImage").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
