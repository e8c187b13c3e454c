//! URL slugs for blog posts.

use chrono::{DateTime, Utc};

/// Used when a title has no slug-able characters at all.
const FALLBACK_SLUG: &str = "post";

/// Turn a title into a lowercase, hyphen-separated slug.
///
/// Only ASCII letters and digits survive. Runs of whitespace and hyphens
/// collapse into a single hyphen, and the result never starts or ends with
/// one. Any other character is dropped without leaving a separator, so
/// `"Don't panic"` becomes `"dont-panic"`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Slug for a post titled `title`, suffixed with the last six digits of
/// `now` in epoch milliseconds.
pub fn generate_slug(title: &str, now: DateTime<Utc>) -> String {
    let suffix = now.timestamp_millis().rem_euclid(1_000_000);
    format!("{}-{:06}", slugify(title), suffix)
}
