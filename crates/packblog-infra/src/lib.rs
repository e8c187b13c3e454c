//! # Packblog Infrastructure
//!
//! Concrete implementations of the ports defined in `packblog-core`.
//! This crate contains the database repositories, in-memory fallbacks and
//! the cover-image asset stores.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `cloudinary` - Cloudinary asset store via the signed upload API

pub mod assets;
pub mod database;
pub mod memory;

// Re-exports - In-Memory
pub use assets::{InMemoryAssetStore, UnconfiguredAssetStore, probe_dimensions};
pub use memory::{InMemoryBlogRepository, InMemoryVisitorRepository};

// Re-exports - External services
#[cfg(feature = "cloudinary")]
pub use assets::{CloudinaryAssetStore, CloudinaryConfig};
#[cfg(feature = "postgres")]
pub use database::{PostgresBlogRepository, PostgresVisitorRepository};
