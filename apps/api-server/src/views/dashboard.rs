//! Blog management pages.

use maud::{Markup, PreEscaped, html};

use packblog_core::domain::content::word_count;
use packblog_core::domain::{
    Blog, BlogQuery, BlogStatus, DEFAULT_AUTHOR, DEFAULT_READ_TIME, EXCERPT_MAX_CHARS,
    TITLE_MAX_CHARS,
};
use packblog_core::ports::ImageDimensions;

use super::{dashboard_layout, format_date};

pub fn blog_table(blogs: &[Blog], query: &BlogQuery) -> Markup {
    let search = query.search.as_deref().unwrap_or_default();
    let content = html! {
        div.page-header {
            h1 { "Blogs" }
            a.button.primary href="/dashboard/blogs/new" { "New Blog" }
        }
        form.filters method="get" action="/dashboard/blogs" {
            input type="search" name="search" placeholder="Search title or excerpt" value=(search);
            select name="status" data-autosubmit {
                (status_option(BlogStatus::All, "All", query.status))
                (status_option(BlogStatus::Published, "Published", query.status))
                (status_option(BlogStatus::Draft, "Drafts", query.status))
            }
            button type="submit" { "Filter" }
        }
        @if blogs.is_empty() {
            p.empty { "No blogs found." }
        } @else {
            table.data-table {
                thead {
                    tr {
                        th { "Title" }
                        th { "Status" }
                        th { "Featured" }
                        th { "Views" }
                        th { "Created" }
                        th { "Actions" }
                    }
                }
                tbody {
                    @for blog in blogs {
                        (blog_row(blog))
                    }
                }
            }
        }
    };
    dashboard_layout("Blogs", "blogs", content)
}

fn status_option(status: BlogStatus, label: &str, selected: BlogStatus) -> Markup {
    let value = match status {
        BlogStatus::All => "all",
        BlogStatus::Published => "published",
        BlogStatus::Draft => "draft",
    };
    html! {
        option value=(value) selected[status == selected] { (label) }
    }
}

fn blog_row(blog: &Blog) -> Markup {
    let id = blog.id.to_string();
    html! {
        tr {
            td {
                strong { (blog.title) }
                br;
                small.muted { (blog.slug) }
            }
            td {
                @if blog.published {
                    span.badge.published { "Published" }
                } @else {
                    span.badge.draft { "Draft" }
                }
            }
            td { @if blog.featured { "★" } }
            td { (blog.views) }
            td { (format_date(&blog.created_at)) }
            td.actions {
                a href={ "/dashboard/blogs/" (id) "/edit" } { "Edit" }
                button type="button"
                    data-publish-id=(id)
                    data-published=(if blog.published { "true" } else { "false" }) {
                    @if blog.published { "Unpublish" } @else { "Publish" }
                }
                @if blog.published {
                    a href={ "/blogs/" (blog.slug) } target="_blank" { "View" }
                }
                button.danger type="button" data-delete-id=(id) { "Delete" }
            }
        }
    }
}

/// Create form when `blog` is `None`, edit form otherwise.
pub fn blog_form(blog: Option<&Blog>) -> Markup {
    let (title, method, action) = match blog {
        Some(b) => ("Edit Blog", "PUT", format!("/api/blogs/{}", b.id)),
        None => ("New Blog", "POST", "/api/blogs".to_string()),
    };
    let content_html = blog.map(|b| b.content.as_str()).unwrap_or_default();
    let tags: &[String] = blog.map(|b| b.tags.as_slice()).unwrap_or_default();
    let rec = ImageDimensions::RECOMMENDED;

    let content = html! {
        div.page-header {
            h1 { (title) }
            a.button href="/dashboard/blogs" { "Cancel" }
        }
        form #blog-form data-method=(method) data-action=(action) {
            label {
                "Title"
                input type="text" name="title" required maxlength=(TITLE_MAX_CHARS)
                    value=[blog.map(|b| b.title.as_str())];
            }
            label {
                "Excerpt"
                textarea name="excerpt" rows="3" required maxlength=(EXCERPT_MAX_CHARS) {
                    @if let Some(b) = blog { (b.excerpt) }
                }
            }
            div.field {
                span.label { "Content" }
                (editor_toolbar())
                div #editor.editor contenteditable="true" {
                    (PreEscaped(content_html))
                }
                input type="hidden" name="content" value=(content_html);
                small #word-count.muted { (word_count(content_html)) " words" }
            }
            div.grid {
                label {
                    "Author"
                    input type="text" name="author"
                        value=(blog.map(|b| b.author.as_str()).unwrap_or(DEFAULT_AUTHOR));
                }
                label {
                    "Read time (minutes)"
                    input type="number" name="readTime" min="1"
                        value=(blog.map(|b| b.read_time).unwrap_or(DEFAULT_READ_TIME));
                }
            }
            div.field {
                span.label { "Tags" }
                div.tag-input {
                    input #tag-input type="text" placeholder="Add a tag";
                    button #add-tag type="button" { "Add" }
                }
                // Always sent, so removing every tag clears the list.
                input type="hidden" name="tags" value="";
                ul #tag-list.tags {
                    @for tag in tags {
                        li.tag data-tag=(tag) {
                            (tag)
                            input type="hidden" name="tags" value=(tag);
                            button.remove-tag type="button" aria-label="Remove tag" { "×" }
                        }
                    }
                }
            }
            div.field {
                span.label { "Cover image" }
                @if let Some(cover) = blog.and_then(|b| b.cover_image.as_ref()) {
                    img #cover-preview.cover-preview src=(cover.url) alt="Current cover";
                } @else {
                    img #cover-preview.cover-preview hidden alt="Cover preview";
                }
                input #cover-input type="file" name="coverImage" accept="image/*"
                    data-min-width=(rec.width) data-min-height=(rec.height);
                small #cover-hint.muted {
                    "Recommended size: " (rec.width) "×" (rec.height) "px"
                }
            }
            div.checkboxes {
                label {
                    input type="checkbox" name="published" value="true"
                        checked[blog.is_some_and(|b| b.published)];
                    " Published"
                }
                label {
                    input type="checkbox" name="featured" value="true"
                        checked[blog.is_some_and(|b| b.featured)];
                    " Featured"
                }
            }
            button.primary type="submit" { @if blog.is_some() { "Update Blog" } @else { "Create Blog" } }
        }
        script src="/static/editor.js" {}
    };
    dashboard_layout(title, "blogs", content)
}

fn editor_toolbar() -> Markup {
    html! {
        div.toolbar role="toolbar" {
            button type="button" data-command="bold" title="Bold" { b { "B" } }
            button type="button" data-command="italic" title="Italic" { i { "I" } }
            button type="button" data-command="underline" title="Underline" { u { "U" } }
            button type="button" data-block="h2" title="Heading 2" { "H2" }
            button type="button" data-block="h3" title="Heading 3" { "H3" }
            button type="button" data-command="insertUnorderedList" title="Bulleted list" { "• List" }
            button type="button" data-command="insertOrderedList" title="Numbered list" { "1. List" }
            button type="button" data-prompt="createLink" title="Insert link" { "Link" }
            button type="button" data-prompt="insertImage" title="Insert image" { "Image" }
        }
    }
}

pub fn not_found_page() -> Markup {
    let content = html! {
        h1 { "Blog Not Found" }
        p { "This blog does not exist or has been deleted." }
        a.button href="/dashboard/blogs" { "Back to blogs" }
    };
    dashboard_layout("Not Found", "blogs", content)
}

pub fn error_page(message: &str) -> Markup {
    let content = html! {
        h1 { "Something went wrong" }
        p.error { (message) }
    };
    dashboard_layout("Error", "", content)
}
