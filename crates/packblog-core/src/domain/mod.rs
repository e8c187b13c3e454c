//! Domain entities - the core business objects.

mod blog;
pub mod content;
pub mod slug;
mod visitor;

pub use blog::{
    Blog, BlogDraft, BlogPatch, BlogQuery, BlogStatus, BlogSummary, CoverImage, DEFAULT_AUTHOR,
    DEFAULT_READ_TIME, EXCERPT_MAX_CHARS, TITLE_MAX_CHARS,
};
pub use visitor::{
    CountryCount, UNKNOWN_COUNTRY, VISITOR_LIST_LIMIT, Visitor, VisitorQuery, VisitorStats,
    is_listable_country, tally_by_country,
};

pub(crate) use blog::validate_lengths;
