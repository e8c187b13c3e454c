//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use packblog_infra::database::DatabaseConfig;

const DEFAULT_CLOUDINARY_FOLDER: &str = "custom-pack-boxes/blogs";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub assets: Option<AssetConfig>,
    /// Largest accepted cover image, in bytes.
    pub max_upload_bytes: usize,
}

/// Cloudinary credentials. Only present when all three are set.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = non_empty_var("DATABASE_URL").map(|url| {
            let mut config = DatabaseConfig::new(url);
            config.max_connections = parse_var("DB_MAX_CONNECTIONS").unwrap_or(20);
            config.min_connections = parse_var("DB_MIN_CONNECTIONS").unwrap_or(2);
            config
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            assets: AssetConfig::from_env(),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES").unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }
}

impl AssetConfig {
    fn from_env() -> Option<Self> {
        Some(Self {
            cloud_name: non_empty_var("CLOUDINARY_CLOUD_NAME")?,
            api_key: non_empty_var("CLOUDINARY_API_KEY")?,
            api_secret: non_empty_var("CLOUDINARY_API_SECRET")?,
            folder: non_empty_var("CLOUDINARY_FOLDER")
                .unwrap_or_else(|| DEFAULT_CLOUDINARY_FOLDER.to_string()),
        })
    }

    #[cfg(feature = "cloudinary")]
    pub fn cloudinary(&self) -> packblog_infra::CloudinaryConfig {
        packblog_infra::CloudinaryConfig {
            cloud_name: self.cloud_name.clone(),
            api_key: self.api_key.clone(),
            api_secret: self.api_secret.clone(),
            folder: self.folder.clone(),
            timeout: std::time::Duration::from_secs(30),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
