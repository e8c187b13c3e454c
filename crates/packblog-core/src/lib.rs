//! # Packblog Core
//!
//! The domain layer of the blog dashboard: blog and visitor entities, the
//! rules that shape them (slugs, tags, content), the ports infrastructure
//! must implement, and the service that orchestrates blog writes.
//! This crate has no database or HTTP dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
pub use services::BlogService;
