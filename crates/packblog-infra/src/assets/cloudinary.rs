//! Cloudinary asset store using the signed upload and destroy endpoints.
//!
//! Requests are signed by SHA-1 hashing the sorted `key=value` parameters
//! joined with `&`, followed by the API secret.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use packblog_core::domain::CoverImage;
use packblog_core::ports::{AssetError, AssetStore, UploadFile};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Crop covers to the OpenGraph card size.
const COVER_TRANSFORMATION: &str = "c_fill,g_auto,h_630,w_1200";

/// Cloudinary credentials and upload settings.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: String,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

pub struct CloudinaryAssetStore {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryAssetStore {
    pub fn new(config: CloudinaryConfig) -> Result<Self, AssetError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AssetError::Upload(format!("failed to build HTTP client: {e}")))?;

        tracing::info!(
            cloud = %config.cloud_name,
            folder = %config.folder,
            "Cloudinary asset store configured"
        );
        Ok(Self { client, config })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{API_BASE}/{}/image/{action}", self.config.cloud_name)
    }

    fn sign(&self, params: &[(&str, &str)]) -> String {
        signature(params, &self.config.api_secret)
    }
}

fn signature(params: &[(&str, &str)], secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by_key(|(key, _)| *key);

    let to_sign = sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

fn timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}

#[async_trait]
impl AssetStore for CloudinaryAssetStore {
    async fn upload(&self, file: &UploadFile) -> Result<CoverImage, AssetError> {
        let timestamp = timestamp();
        let signature = self.sign(&[
            ("folder", self.config.folder.as_str()),
            ("timestamp", timestamp.as_str()),
            ("transformation", COVER_TRANSFORMATION),
        ]);

        let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| AssetError::Upload(e.to_string()))?;
        }

        let form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("folder", self.config.folder.clone())
            .text("timestamp", timestamp)
            .text("transformation", COVER_TRANSFORMATION)
            .text("signature", signature);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AssetError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssetError::Upload(format!("{status}: {body}")));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| AssetError::Upload(e.to_string()))?;

        tracing::debug!(public_id = %uploaded.public_id, "Cover image uploaded");
        Ok(CoverImage {
            public_id: uploaded.public_id,
            url: uploaded.secure_url,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), AssetError> {
        let timestamp = timestamp();
        let signature = self.sign(&[("public_id", public_id), ("timestamp", timestamp.as_str())]);

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&[
                ("public_id", public_id),
                ("timestamp", timestamp.as_str()),
                ("api_key", self.config.api_key.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AssetError::Delete(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssetError::Delete(format!("{status}: {body}")));
        }

        let destroyed: DestroyResponse = response
            .json()
            .await
            .map_err(|e| AssetError::Delete(e.to_string()))?;

        // "not found" means it is already gone.
        match destroyed.result.as_str() {
            "ok" | "not found" => {
                tracing::debug!(public_id, result = %destroyed.result, "Cover image deleted");
                Ok(())
            }
            other => Err(AssetError::Delete(format!(
                "unexpected destroy result: {other}"
            ))),
        }
    }
}
