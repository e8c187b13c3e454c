//! Rules for the free-form parts of a post: tags and rich-text HTML.

/// Trim tags, drop blanks and keep only the first occurrence of each.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

/// Sanitize editor HTML before it is stored.
///
/// Keeps the formatting the dashboard editor produces (emphasis, headings,
/// lists, links, images) and strips scripts, event handlers and inline
/// styles. Published pages inject stored content verbatim.
pub fn sanitize_html(html: &str) -> String {
    ammonia::clean(html)
}

/// Number of whitespace-separated words in an HTML fragment, ignoring markup.
pub fn word_count(html: &str) -> usize {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;

    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    text.replace("&nbsp;", " ").split_whitespace().count()
}
