//! Asset storage port - where cover images live.

use async_trait::async_trait;

use crate::domain::CoverImage;

/// Pixel size of an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    /// Cover images are rendered at 1200x630 (the OpenGraph card size).
    pub const RECOMMENDED: ImageDimensions = ImageDimensions {
        width: 1200,
        height: 630,
    };

    pub fn meets_recommended(&self) -> bool {
        self.width >= Self::RECOMMENDED.width && self.height >= Self::RECOMMENDED.height
    }
}

/// A file received from the dashboard form.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    /// Filled in once the bytes have been decoded as an image.
    pub dimensions: Option<ImageDimensions>,
}

impl UploadFile {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Asset store trait - abstraction over image hosting backends.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store a file and return its identifier and public URL.
    async fn upload(&self, file: &UploadFile) -> Result<CoverImage, AssetError>;

    /// Remove a previously uploaded asset.
    async fn delete(&self, public_id: &str) -> Result<(), AssetError>;
}

/// Asset store errors.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset storage is not configured")]
    NotConfigured,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Failed to upload image: {0}")]
    Upload(String),

    #[error("Failed to delete image: {0}")]
    Delete(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommended_dimensions() {
        assert!(ImageDimensions { width: 1200, height: 630 }.meets_recommended());
        assert!(ImageDimensions { width: 2400, height: 1260 }.meets_recommended());
        assert!(!ImageDimensions { width: 1199, height: 630 }.meets_recommended());
        assert!(!ImageDimensions { width: 1600, height: 600 }.meets_recommended());
    }
}
