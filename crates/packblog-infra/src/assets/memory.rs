//! In-memory asset store. Keeps uploads in a map and remembers every
//! delete call, which makes it the asset store of choice in tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use packblog_core::domain::CoverImage;
use packblog_core::ports::{AssetError, AssetStore, UploadFile};

pub struct InMemoryAssetStore {
    folder: String,
    assets: RwLock<HashMap<String, UploadFile>>,
    deleted: RwLock<Vec<String>>,
    fail_uploads: AtomicBool,
}

impl InMemoryAssetStore {
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            assets: RwLock::new(HashMap::new()),
            deleted: RwLock::new(Vec::new()),
            fail_uploads: AtomicBool::new(false),
        }
    }

    /// Make every following upload fail.
    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Public ids passed to `delete`, in call order.
    pub async fn deleted_ids(&self) -> Vec<String> {
        self.deleted.read().await.clone()
    }

    pub async fn stored_count(&self) -> usize {
        self.assets.read().await.len()
    }

    pub async fn contains(&self, public_id: &str) -> bool {
        self.assets.read().await.contains_key(public_id)
    }
}

impl Default for InMemoryAssetStore {
    fn default() -> Self {
        Self::new("blogs")
    }
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn upload(&self, file: &UploadFile) -> Result<CoverImage, AssetError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(AssetError::Upload("upload rejected".to_string()));
        }

        let public_id = format!("{}/{}", self.folder, Uuid::new_v4().simple());
        let url = format!("memory://{public_id}");
        self.assets
            .write()
            .await
            .insert(public_id.clone(), file.clone());

        Ok(CoverImage { public_id, url })
    }

    async fn delete(&self, public_id: &str) -> Result<(), AssetError> {
        self.deleted.write().await.push(public_id.to_string());
        self.assets.write().await.remove(public_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> UploadFile {
        UploadFile {
            file_name: "cover.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![1, 2, 3],
            dimensions: None,
        }
    }

    #[tokio::test]
    async fn test_upload_then_delete() {
        let store = InMemoryAssetStore::new("custom-pack-boxes/blogs");
        let image = store.upload(&file()).await.unwrap();

        assert!(image.public_id.starts_with("custom-pack-boxes/blogs/"));
        assert!(store.contains(&image.public_id).await);

        store.delete(&image.public_id).await.unwrap();
        assert_eq!(store.stored_count().await, 0);
        assert_eq!(store.deleted_ids().await, vec![image.public_id]);
    }

    #[tokio::test]
    async fn test_failing_uploads() {
        let store = InMemoryAssetStore::default();
        store.fail_uploads(true);
        assert!(matches!(
            store.upload(&file()).await,
            Err(AssetError::Upload(_))
        ));
    }
}
