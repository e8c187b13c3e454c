//! Application state - built once at startup and shared across all handlers.

use std::sync::Arc;

use packblog_core::BlogService;
use packblog_core::ports::{AssetStore, BlogRepository, VisitorRepository};
use packblog_infra::database::DatabaseConfig;
use packblog_infra::{InMemoryBlogRepository, InMemoryVisitorRepository, UnconfiguredAssetStore};

use crate::config::{AppConfig, AssetConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blogs: BlogService,
    pub visitors: Arc<dyn VisitorRepository>,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (blog_repo, visitors) = repositories(config.database.as_ref()).await;
        let assets = asset_store(config.assets.as_ref());

        tracing::info!("Application state initialized");
        Self::from_parts(blog_repo, visitors, assets, config.max_upload_bytes)
    }

    pub fn from_parts(
        blog_repo: Arc<dyn BlogRepository>,
        visitors: Arc<dyn VisitorRepository>,
        assets: Arc<dyn AssetStore>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            blogs: BlogService::new(blog_repo, assets),
            visitors,
            max_upload_bytes,
        }
    }
}

type Repositories = (Arc<dyn BlogRepository>, Arc<dyn VisitorRepository>);

fn in_memory() -> Repositories {
    (
        Arc::new(InMemoryBlogRepository::new()),
        Arc::new(InMemoryVisitorRepository::new()),
    )
}

#[cfg(feature = "postgres")]
async fn repositories(db_config: Option<&DatabaseConfig>) -> Repositories {
    use packblog_infra::{PostgresBlogRepository, PostgresVisitorRepository};

    let Some(config) = db_config else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return in_memory();
    };

    match packblog_infra::database::connect(config).await {
        Ok(conn) => (
            Arc::new(PostgresBlogRepository::new(conn.clone())),
            Arc::new(PostgresVisitorRepository::new(conn)),
        ),
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            in_memory()
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn repositories(_db_config: Option<&DatabaseConfig>) -> Repositories {
    tracing::info!("Running without postgres feature - using in-memory repositories");
    in_memory()
}

#[cfg(feature = "cloudinary")]
fn asset_store(config: Option<&AssetConfig>) -> Arc<dyn AssetStore> {
    let Some(config) = config else {
        tracing::warn!("Cloudinary credentials not set. Cover image uploads are disabled.");
        return Arc::new(UnconfiguredAssetStore);
    };

    match packblog_infra::CloudinaryAssetStore::new(config.cloudinary()) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("Failed to set up Cloudinary: {}. Uploads are disabled.", e);
            Arc::new(UnconfiguredAssetStore)
        }
    }
}

#[cfg(not(feature = "cloudinary"))]
fn asset_store(_config: Option<&AssetConfig>) -> Arc<dyn AssetStore> {
    tracing::info!("Running without cloudinary feature - cover image uploads are disabled");
    Arc::new(UnconfiguredAssetStore)
}
