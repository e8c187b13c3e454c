//! Multipart parsing for the dashboard blog form.

use actix_multipart::{Field, Multipart};
use futures::StreamExt;

use packblog_core::domain::content::normalize_tags;
use packblog_core::domain::{BlogDraft, BlogPatch, DEFAULT_AUTHOR, DEFAULT_READ_TIME};
use packblog_core::ports::UploadFile;
use packblog_infra::probe_dimensions;

use crate::middleware::error::{AppError, AppResult};

/// Raw fields of a blog form submission. Absent fields stay `None` so an
/// update can tell "not sent" from "sent".
#[derive(Debug, Default)]
pub struct BlogForm {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub read_time: Option<i32>,
    pub cover: Option<UploadFile>,
}

impl BlogForm {
    /// Read every part of the payload. Each part is capped at `max_bytes`.
    pub async fn from_multipart(mut payload: Multipart, max_bytes: usize) -> AppResult<Self> {
        let mut form = BlogForm::default();

        while let Some(item) = payload.next().await {
            let mut field =
                item.map_err(|e| AppError::BadRequest(format!("Invalid form data: {e}")))?;
            let name = field.name().unwrap_or_default().to_string();

            if name == "coverImage" {
                form.cover = read_cover(&mut field, max_bytes).await?;
                continue;
            }

            let bytes = read_field(&mut field, max_bytes).await?;
            let value = String::from_utf8(bytes)
                .map_err(|_| AppError::BadRequest(format!("Field {name} is not valid UTF-8")))?;
            form.set_text(&name, value);
        }

        Ok(form)
    }

    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "title" => self.title = Some(value),
            "excerpt" => self.excerpt = Some(value),
            "content" => self.content = Some(value),
            "author" => self.author = Some(value),
            "tags" | "tags[]" => self.tags.get_or_insert_with(Vec::new).push(value),
            "published" => self.published = Some(parse_flag(&value)),
            "featured" => self.featured = Some(parse_flag(&value)),
            "readTime" => self.read_time = parse_read_time(&value),
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    /// Fields for a new blog, trimmed and with defaults filled in.
    pub fn into_draft(self) -> (BlogDraft, Option<UploadFile>) {
        let draft = BlogDraft {
            title: trimmed(self.title),
            excerpt: trimmed(self.excerpt),
            content: trimmed(self.content),
            author: Some(trimmed(self.author))
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            tags: self.tags.map(normalize_tags).unwrap_or_default(),
            published: self.published.unwrap_or(false),
            featured: self.featured.unwrap_or(false),
            read_time: self.read_time.unwrap_or(DEFAULT_READ_TIME),
        };
        (draft, self.cover)
    }

    pub fn into_patch(self) -> (BlogPatch, Option<UploadFile>) {
        let patch = BlogPatch {
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            author: self.author,
            tags: self.tags.map(normalize_tags),
            published: self.published,
            featured: self.featured,
            read_time: self.read_time,
        };
        (patch, self.cover)
    }
}

async fn read_field(field: &mut Field, max_bytes: usize) -> AppResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::BadRequest(format!("Invalid form data: {e}")))?;
        if bytes.len() + chunk.len() > max_bytes {
            return Err(AppError::BadRequest(format!(
                "Form field exceeds the {max_bytes} byte limit"
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// An empty file input still sends a part; that counts as no cover.
async fn read_cover(field: &mut Field, max_bytes: usize) -> AppResult<Option<UploadFile>> {
    let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or("cover")
        .to_string();
    let content_type = field.content_type().map(|m| m.to_string());

    let bytes = read_field(field, max_bytes).await?;
    if bytes.is_empty() {
        return Ok(None);
    }

    let dimensions = probe_dimensions(&bytes)?;
    Ok(Some(UploadFile {
        file_name,
        content_type,
        bytes,
        dimensions: Some(dimensions),
    }))
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn parse_flag(value: &str) -> bool {
    value.trim() == "true"
}

/// Positive whole minutes; anything else is treated as not supplied.
fn parse_read_time(value: &str) -> Option<i32> {
    value.trim().parse::<i32>().ok().filter(|m| *m > 0)
}
