//! Blog write orchestration: validation, slugs, cover images and persistence.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::content::sanitize_html;
use crate::domain::slug::generate_slug;
use crate::domain::{Blog, BlogDraft, BlogPatch, BlogQuery, BlogSummary, CoverImage, validate_lengths};
use crate::error::{DomainError, RepoError};
use crate::ports::{AssetStore, BlogRepository, ImageDimensions, UploadFile};

/// Maximum number of related posts shown next to a public post.
pub const RELATED_LIMIT: u64 = 3;

/// A blog after a create or update, with an optional note about its cover.
#[derive(Debug, Clone)]
pub struct SavedBlog {
    pub blog: Blog,
    pub cover_notice: Option<String>,
}

/// A published blog as seen by a reader.
#[derive(Debug, Clone)]
pub struct PublicPost {
    pub blog: Blog,
    pub related: Vec<BlogSummary>,
}

/// Blog operations shared by the JSON API and the server-rendered pages.
#[derive(Clone)]
pub struct BlogService {
    blogs: Arc<dyn BlogRepository>,
    assets: Arc<dyn AssetStore>,
}

impl BlogService {
    pub fn new(blogs: Arc<dyn BlogRepository>, assets: Arc<dyn AssetStore>) -> Self {
        Self { blogs, assets }
    }

    pub async fn list(&self, query: &BlogQuery) -> Result<Vec<Blog>, DomainError> {
        Ok(self.blogs.list(query).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Blog, DomainError> {
        self.blogs
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::blog_not_found(id))
    }

    /// Validate, upload the cover (if any) and persist a new blog.
    pub async fn create(
        &self,
        mut draft: BlogDraft,
        cover: Option<UploadFile>,
    ) -> Result<SavedBlog, DomainError> {
        draft.validate()?;
        draft.content = clean_content(&draft.content)?;

        let cover = cover.filter(|f| !f.is_empty());
        let cover_notice = cover.as_ref().and_then(cover_notice);
        let cover_image = match &cover {
            Some(file) => Some(self.assets.upload(file).await?),
            None => None,
        };

        let slug = generate_slug(&draft.title, Utc::now());
        let blog = Blog::new(draft, slug, cover_image.clone());
        let blog = self
            .blogs
            .insert(blog)
            .await
            .inspect_err(|_| warn_orphaned(cover_image.as_ref()))?;

        tracing::info!(blog_id = %blog.id, slug = %blog.slug, "Blog created");
        Ok(SavedBlog { blog, cover_notice })
    }

    /// Merge `patch` over the stored blog.
    ///
    /// The slug changes only when the title text does. A new cover replaces
    /// the old one, which is deleted from the asset store first.
    pub async fn update(
        &self,
        id: Uuid,
        patch: BlogPatch,
        cover: Option<UploadFile>,
    ) -> Result<SavedBlog, DomainError> {
        let mut blog = self.get(id).await?;

        let title = non_blank(patch.title).unwrap_or_else(|| blog.title.clone());
        let excerpt = non_blank(patch.excerpt).unwrap_or_else(|| blog.excerpt.clone());
        validate_lengths(&title, &excerpt)?;

        if let Some(content) = non_blank(patch.content) {
            blog.content = clean_content(&content)?;
        }
        if let Some(author) = non_blank(patch.author) {
            blog.author = author;
        }
        if let Some(tags) = patch.tags {
            blog.tags = tags;
        }
        if let Some(published) = patch.published {
            blog.published = published;
        }
        if let Some(featured) = patch.featured {
            blog.featured = featured;
        }
        if let Some(read_time) = patch.read_time {
            blog.read_time = read_time;
        }

        if title != blog.title {
            blog.slug = generate_slug(&title, Utc::now());
        }
        blog.title = title;
        blog.excerpt = excerpt;

        let cover = cover.filter(|f| !f.is_empty());
        let cover_notice = cover.as_ref().and_then(cover_notice);
        let mut uploaded = None;
        if let Some(file) = &cover {
            if let Some(old) = blog.cover_image.take() {
                self.assets.delete(&old.public_id).await?;
            }
            let image = self.assets.upload(file).await?;
            blog.cover_image = Some(image.clone());
            uploaded = Some(image);
        }

        blog.updated_at = Utc::now();
        let blog = self
            .blogs
            .update(blog)
            .await
            .inspect_err(|_| warn_orphaned(uploaded.as_ref()))?;

        tracing::info!(blog_id = %blog.id, slug = %blog.slug, "Blog updated");
        Ok(SavedBlog { blog, cover_notice })
    }

    /// Delete the cover asset, then the record.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let blog = self.get(id).await?;

        if let Some(cover) = blog.cover_image.as_ref().filter(|c| !c.public_id.is_empty()) {
            self.assets.delete(&cover.public_id).await?;
        }
        self.blogs.delete(id).await?;

        tracing::info!(blog_id = %id, "Blog deleted");
        Ok(())
    }

    pub async fn set_published(&self, id: Uuid, published: bool) -> Result<Blog, DomainError> {
        let blog = match self.blogs.set_published(id, published, Utc::now()).await {
            Ok(blog) => blog,
            Err(RepoError::NotFound) => return Err(DomainError::blog_not_found(id)),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(blog_id = %id, published, "Blog publish state changed");
        Ok(blog)
    }

    /// Look up a published post for a reader and count the view.
    ///
    /// The view counter is bumped after the read and failures there are
    /// only logged.
    pub async fn read_published(&self, slug: &str) -> Result<Option<PublicPost>, DomainError> {
        let Some(mut blog) = self.blogs.find_published_by_slug(slug).await? else {
            return Ok(None);
        };

        match self.blogs.increment_views(blog.id).await {
            Ok(()) => blog.views += 1,
            Err(e) => tracing::warn!(blog_id = %blog.id, error = %e, "Failed to count blog view"),
        }

        let related = self.blogs.find_related(&blog, RELATED_LIMIT).await?;
        Ok(Some(PublicPost { blog, related }))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_content(content: &str) -> Result<String, DomainError> {
    let cleaned = sanitize_html(content.trim());
    if cleaned.trim().is_empty() {
        return Err(DomainError::Validation(
            "Content has no text left after removing unsupported markup".to_string(),
        ));
    }
    Ok(cleaned)
}

fn cover_notice(file: &UploadFile) -> Option<String> {
    let dims = file.dimensions.filter(|d| !d.meets_recommended())?;
    let rec = ImageDimensions::RECOMMENDED;
    Some(format!(
        "cover image is {}×{}px, below the recommended {}×{}px",
        dims.width, dims.height, rec.width, rec.height
    ))
}

fn warn_orphaned(image: Option<&CoverImage>) {
    if let Some(image) = image {
        tracing::warn!(public_id = %image.public_id, "Cover image left orphaned by failed save");
    }
}
