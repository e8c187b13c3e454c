//! Blog entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{FromQueryResult, NotSet, Set};

use packblog_core::domain::{Blog, BlogSummary, CoverImage};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blogs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub excerpt: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub cover_image_public_id: Option<String>,
    pub cover_image_url: Option<String>,
    pub author: String,
    pub tags: Vec<String>,
    pub published: bool,
    pub featured: bool,
    pub read_time: i32,
    pub views: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Every column except `content`, for related-post listings.
#[derive(Debug, FromQueryResult)]
pub struct SummaryRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub cover_image_public_id: Option<String>,
    pub cover_image_url: Option<String>,
    pub author: String,
    pub tags: Vec<String>,
    pub published: bool,
    pub featured: bool,
    pub read_time: i32,
    pub views: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl SummaryRow {
    pub const COLUMNS: [Column; 14] = [
        Column::Id,
        Column::Title,
        Column::Slug,
        Column::Excerpt,
        Column::CoverImagePublicId,
        Column::CoverImageUrl,
        Column::Author,
        Column::Tags,
        Column::Published,
        Column::Featured,
        Column::ReadTime,
        Column::Views,
        Column::CreatedAt,
        Column::UpdatedAt,
    ];
}

fn cover_image(public_id: Option<String>, url: Option<String>) -> Option<CoverImage> {
    match (public_id, url) {
        (Some(public_id), Some(url)) if !url.is_empty() => Some(CoverImage { public_id, url }),
        _ => None,
    }
}

/// Conversion from SeaORM Model to Domain Blog.
impl From<Model> for Blog {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            excerpt: model.excerpt,
            content: model.content,
            cover_image: cover_image(model.cover_image_public_id, model.cover_image_url),
            author: model.author,
            tags: model.tags,
            published: model.published,
            featured: model.featured,
            read_time: model.read_time,
            views: model.views,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<SummaryRow> for BlogSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            excerpt: row.excerpt,
            cover_image: cover_image(row.cover_image_public_id, row.cover_image_url),
            author: row.author,
            tags: row.tags,
            published: row.published,
            featured: row.featured,
            read_time: row.read_time,
            views: row.views,
            created_at: row.created_at.into(),
            updated_at: row.updated_at.into(),
        }
    }
}

/// Conversion from Domain Blog to SeaORM ActiveModel.
///
/// `views` is left `NotSet`: inserts take the column default and updates
/// never overwrite counts bumped by concurrent readers.
impl From<Blog> for ActiveModel {
    fn from(blog: Blog) -> Self {
        let (public_id, url) = match blog.cover_image {
            Some(image) => (Some(image.public_id), Some(image.url)),
            None => (None, None),
        };
        Self {
            id: Set(blog.id),
            title: Set(blog.title),
            slug: Set(blog.slug),
            excerpt: Set(blog.excerpt),
            content: Set(blog.content),
            cover_image_public_id: Set(public_id),
            cover_image_url: Set(url),
            author: Set(blog.author),
            tags: Set(blog.tags),
            published: Set(blog.published),
            featured: Set(blog.featured),
            read_time: Set(blog.read_time),
            views: NotSet,
            created_at: Set(blog.created_at.into()),
            updated_at: Set(blog.updated_at.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    #[test]
    fn test_active_model_leaves_views_to_the_database() {
        let mut blog: Blog = Model {
            id: Uuid::new_v4(),
            title: "Kraft Tubes".to_owned(),
            slug: "kraft-tubes-000001".to_owned(),
            excerpt: "Tubes".to_owned(),
            content: "<p>Tubes</p>".to_owned(),
            cover_image_public_id: None,
            cover_image_url: None,
            author: "Admin".to_owned(),
            tags: vec![],
            published: false,
            featured: false,
            read_time: 5,
            views: 12,
            created_at: chrono::Utc::now().into(),
            updated_at: chrono::Utc::now().into(),
        }
        .into();
        blog.published = true;

        let active: ActiveModel = blog.into();
        assert!(matches!(active.views, ActiveValue::NotSet));
        assert!(matches!(active.published, ActiveValue::Set(true)));
    }
}
