//! Public blog pages.

use maud::{Markup, PreEscaped, html};

use packblog_core::domain::{Blog, BlogSummary};
use packblog_core::services::PublicPost;

use super::{OpenGraph, PageMeta, SITE_NAME, base_document, format_date};

const FALLBACK_KEYWORDS: &str = "packaging, boxes, custom";

pub fn post_meta(blog: &Blog) -> PageMeta {
    let keywords = if blog.tags.is_empty() {
        FALLBACK_KEYWORDS.to_string()
    } else {
        blog.tags.join(", ")
    };

    PageMeta {
        title: format!("{} - {SITE_NAME}", blog.title),
        description: Some(blog.excerpt.clone()),
        keywords: Some(keywords),
        open_graph: Some(OpenGraph {
            title: blog.title.clone(),
            description: blog.excerpt.clone(),
            image: blog.cover_image.as_ref().map(|c| c.url.clone()),
            published_time: blog.created_at.to_rfc3339(),
            author: blog.author.clone(),
        }),
    }
}

/// The post itself. Content was sanitized when it was saved and goes out
/// as-is.
pub fn post_page(post: &PublicPost) -> Markup {
    let blog = &post.blog;
    let body = html! {
        (site_header())
        main.post {
            article {
                header.post-header {
                    @if !blog.tags.is_empty() {
                        ul.tags {
                            @for tag in &blog.tags {
                                li.tag { (tag) }
                            }
                        }
                    }
                    h1 { (blog.title) }
                    p.excerpt { (blog.excerpt) }
                    p.byline {
                        span.author { "By " (blog.author) }
                        " · "
                        time datetime=(blog.created_at.to_rfc3339()) { (format_date(&blog.created_at)) }
                        " · "
                        span { (blog.read_time) " min read" }
                        " · "
                        span.views { (blog.views) " views" }
                    }
                }
                @if let Some(cover) = &blog.cover_image {
                    img.cover src=(cover.url) alt=(blog.title) width="1200" height="630";
                }
                div.post-content {
                    (PreEscaped(&blog.content))
                }
            }
            @if !post.related.is_empty() {
                section.related {
                    h2 { "Related Articles" }
                    div.related-grid {
                        @for summary in &post.related {
                            (related_card(summary))
                        }
                    }
                }
            }
        }
    };
    base_document(&post_meta(blog), "public-body", body)
}

fn related_card(summary: &BlogSummary) -> Markup {
    html! {
        a.related-card href={ "/blogs/" (summary.slug) } {
            @if let Some(cover) = &summary.cover_image {
                img src=(cover.url) alt=(summary.title) loading="lazy";
            }
            h3 { (summary.title) }
            p { (summary.excerpt) }
            span.meta { (format_date(&summary.created_at)) " · " (summary.read_time) " min read" }
        }
    }
}

pub fn not_found_page() -> Markup {
    let meta = PageMeta::titled(format!("Blog Not Found - {SITE_NAME}"));
    let body = html! {
        (site_header())
        main.post.message-page {
            h1 { "Blog Not Found" }
            p { "The article you are looking for does not exist or is no longer available." }
        }
    };
    base_document(&meta, "public-body", body)
}

pub fn error_page() -> Markup {
    let meta = PageMeta::titled(format!("Error - {SITE_NAME}"));
    let body = html! {
        (site_header())
        main.post.message-page {
            h1 { "Something went wrong" }
            p { "We could not load this article. Please try again later." }
        }
    };
    base_document(&meta, "public-body", body)
}

fn site_header() -> Markup {
    html! {
        header.site-header {
            span.brand { (SITE_NAME) }
        }
    }
}
