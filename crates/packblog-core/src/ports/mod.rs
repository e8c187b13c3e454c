//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod assets;
mod repository;

pub use assets::{AssetError, AssetStore, ImageDimensions, UploadFile};
pub use repository::{BaseRepository, BlogRepository, VisitorRepository};
