//! In-memory blog repository - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use packblog_core::domain::{Blog, BlogQuery, BlogSummary};
use packblog_core::error::RepoError;
use packblog_core::ports::{BaseRepository, BlogRepository};

/// Blogs held in a HashMap behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryBlogRepository {
    store: RwLock<HashMap<Uuid, Blog>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    fn slug_taken(store: &HashMap<Uuid, Blog>, blog: &Blog) -> bool {
        store
            .values()
            .any(|other| other.id != blog.id && other.slug == blog.slug)
    }
}

impl Default for InMemoryBlogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Blog, Uuid> for InMemoryBlogRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&blog.id) || Self::slug_taken(&store, &blog) {
            return Err(RepoError::Constraint(format!(
                "blog slug or id already exists: {}",
                blog.slug
            )));
        }
        store.insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn update(&self, mut blog: Blog) -> Result<Blog, RepoError> {
        let mut store = self.store.write().await;
        if Self::slug_taken(&store, &blog) {
            return Err(RepoError::Constraint(format!(
                "blog slug already exists: {}",
                blog.slug
            )));
        }
        let stored = store.get_mut(&blog.id).ok_or(RepoError::NotFound)?;
        blog.views = stored.views;
        *stored = blog.clone();
        Ok(blog)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.store.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn list(&self, query: &BlogQuery) -> Result<Vec<Blog>, RepoError> {
        let store = self.store.read().await;
        let mut blogs: Vec<Blog> = store
            .values()
            .filter(|b| query.matches(b))
            .cloned()
            .collect();
        blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(blogs)
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Blog>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .values()
            .find(|b| b.published && b.slug == slug)
            .cloned())
    }

    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let blog = store.get_mut(&id).ok_or(RepoError::NotFound)?;
        blog.views += 1;
        Ok(())
    }

    async fn set_published(
        &self,
        id: Uuid,
        published: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<Blog, RepoError> {
        let mut store = self.store.write().await;
        let blog = store.get_mut(&id).ok_or(RepoError::NotFound)?;
        blog.published = published;
        blog.updated_at = updated_at;
        Ok(blog.clone())
    }

    async fn find_related(&self, blog: &Blog, limit: u64) -> Result<Vec<BlogSummary>, RepoError> {
        let store = self.store.read().await;
        let mut related: Vec<&Blog> = store
            .values()
            .filter(|b| b.id != blog.id && b.published && b.shares_tag_with(&blog.tags))
            .collect();
        related.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(related
            .into_iter()
            .take(limit as usize)
            .map(Blog::summary)
            .collect())
    }
}
