use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Blog, BlogQuery, BlogSummary, Visitor, VisitorQuery, VisitorStats};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `NotFound` if it is gone.
    /// Counters maintained by the store itself are left untouched.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Blog repository.
#[async_trait]
pub trait BlogRepository: BaseRepository<Blog, Uuid> {
    /// Dashboard listing, newest first.
    async fn list(&self, query: &BlogQuery) -> Result<Vec<Blog>, RepoError>;

    /// A published blog by slug. Drafts are never returned.
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Blog>, RepoError>;

    /// Add one to the view counter.
    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError>;

    /// Write only the published flag and `updated_at`, returning the stored row.
    async fn set_published(
        &self,
        id: Uuid,
        published: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<Blog, RepoError>;

    /// Published blogs sharing at least one tag with `blog`, excluding it.
    async fn find_related(&self, blog: &Blog, limit: u64) -> Result<Vec<BlogSummary>, RepoError>;
}

/// Visitor repository. Read-only.
#[async_trait]
pub trait VisitorRepository: Send + Sync {
    /// Visitors newest first, at most `limit` of them.
    async fn list(&self, query: &VisitorQuery, limit: u64) -> Result<Vec<Visitor>, RepoError>;

    /// Distinct known countries, sorted.
    async fn countries(&self) -> Result<Vec<String>, RepoError>;

    async fn stats(&self) -> Result<VisitorStats, RepoError>;
}
