//! Cover-image asset stores - Cloudinary, in-memory, and a store for
//! deployments without image hosting.

mod memory;
mod probe;

#[cfg(feature = "cloudinary")]
mod cloudinary;

use async_trait::async_trait;

use packblog_core::domain::CoverImage;
use packblog_core::ports::{AssetError, AssetStore, UploadFile};

pub use memory::InMemoryAssetStore;
pub use probe::probe_dimensions;

#[cfg(feature = "cloudinary")]
pub use cloudinary::{CloudinaryAssetStore, CloudinaryConfig};

/// Asset store used when no image hosting is configured. Uploads fail, so
/// posts can still be written without a cover image. Deletes are skipped
/// with a warning so posts whose covers were hosted earlier stay removable.
pub struct UnconfiguredAssetStore;

#[async_trait]
impl AssetStore for UnconfiguredAssetStore {
    async fn upload(&self, _file: &UploadFile) -> Result<CoverImage, AssetError> {
        Err(AssetError::NotConfigured)
    }

    async fn delete(&self, public_id: &str) -> Result<(), AssetError> {
        tracing::warn!(public_id, "Asset storage is not configured, leaving cover image in place");
        Ok(())
    }
}
