//! HTML rendering with maud.

pub mod blog;
pub mod dashboard;
pub mod visitors;

use chrono::{DateTime, Utc};
use maud::{DOCTYPE, Markup, html};

pub const SITE_NAME: &str = "Custom Pack Boxes";

/// Document `<head>` metadata.
#[derive(Debug, Default)]
pub struct PageMeta {
    pub title: String,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub open_graph: Option<OpenGraph>,
}

#[derive(Debug)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub published_time: String,
    pub author: String,
}

impl PageMeta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

pub fn base_document(meta: &PageMeta, body_class: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (meta.title) }
                @if let Some(description) = &meta.description {
                    meta name="description" content=(description);
                }
                @if let Some(keywords) = &meta.keywords {
                    meta name="keywords" content=(keywords);
                }
                @if let Some(og) = &meta.open_graph {
                    meta property="og:title" content=(og.title);
                    meta property="og:description" content=(og.description);
                    meta property="og:type" content="article";
                    @if let Some(image) = &og.image {
                        meta property="og:image" content=(image);
                    }
                    meta property="article:published_time" content=(og.published_time);
                    meta property="article:author" content=(og.author);
                }
                link rel="stylesheet" href="/static/app.css";
            }
            body class=(body_class) {
                (content)
            }
        }
    }
}

/// Dashboard chrome: sidebar navigation plus the page body.
pub fn dashboard_layout(title: &str, active: &str, content: Markup) -> Markup {
    let meta = PageMeta::titled(format!("{title} - Dashboard"));
    let body = html! {
        div.dashboard {
            nav.sidebar {
                a.brand href="/dashboard/blogs" { (SITE_NAME) }
                a.nav-link.active[active == "blogs"] href="/dashboard/blogs" { "Blogs" }
                a.nav-link.active[active == "visitors"] href="/dashboard/visitors" { "Visitors" }
            }
            main.dashboard-main {
                (content)
            }
        }
        script src="/static/dashboard.js" {}
    };
    base_document(&meta, "dashboard-body", body)
}

pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

pub fn format_date_time(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_base_document_includes_doctype_and_title() {
        let doc = base_document(&PageMeta::titled("Hello"), "x", html! { p { "body" } })
            .into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Hello</title>"));
        assert!(!doc.contains("og:title"));
    }

    #[test]
    fn test_dashboard_layout_marks_active_link() {
        let doc = dashboard_layout("Visitors", "visitors", html! {}).into_string();
        assert!(doc.contains(r#"class="nav-link active" href="/dashboard/visitors""#));
        assert!(doc.contains(r#"class="nav-link" href="/dashboard/blogs""#));
    }

    #[test]
    fn test_format_date() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 10, 0, 0).unwrap();
        assert_eq!(format_date(&at), "March 7, 2025");
    }
}
