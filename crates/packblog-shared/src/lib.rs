//! # Packblog Shared
//!
//! Wire types shared by the JSON API and the dashboard: the response
//! envelope and the request/response bodies that are not domain entities.

pub mod dto;
pub mod response;

pub use response::ApiResponse;
