//! In-memory repositories - used as fallback when no database is configured,
//! and as test doubles.

mod blog;
mod visitor;

pub use blog::InMemoryBlogRepository;
pub use visitor::InMemoryVisitorRepository;
