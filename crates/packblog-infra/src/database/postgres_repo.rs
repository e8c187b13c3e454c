//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use packblog_core::domain::{
    Blog, BlogQuery, BlogSummary, UNKNOWN_COUNTRY, Visitor, VisitorQuery, VisitorStats,
};
use packblog_core::error::RepoError;
use packblog_core::ports::{BlogRepository, VisitorRepository};

use super::entity::blog::{self, Entity as BlogEntity, SummaryRow};
use super::entity::visitor::{self, Entity as VisitorEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL blog repository.
pub type PostgresBlogRepository = PostgresBaseRepository<BlogEntity>;

/// PostgreSQL visitor repository.
pub type PostgresVisitorRepository = PostgresBaseRepository<VisitorEntity>;

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn list(&self, query: &BlogQuery) -> Result<Vec<Blog>, RepoError> {
        let mut select = BlogEntity::find();

        if let Some(published) = query.status.published_filter() {
            select = select.filter(blog::Column::Published.eq(published));
        }
        if let Some(search) = &query.search {
            let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
            let lower = |col: blog::Column| Expr::expr(Func::lower(Expr::col((BlogEntity, col))));
            select = select.filter(
                Condition::any()
                    .add(lower(blog::Column::Title).like(LikeExpr::new(pattern.clone()).escape('\\')))
                    .add(lower(blog::Column::Excerpt).like(LikeExpr::new(pattern).escape('\\'))),
            );
        }

        let result = select
            .order_by_desc(blog::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Blog>, RepoError> {
        tracing::debug!(slug, "Finding published blog by slug");

        let result = BlogEntity::find()
            .filter(blog::Column::Slug.eq(slug))
            .filter(blog::Column::Published.eq(true))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError> {
        let result = BlogEntity::update_many()
            .col_expr(
                blog::Column::Views,
                Expr::col(blog::Column::Views).add(1),
            )
            .filter(blog::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn set_published(
        &self,
        id: Uuid,
        published: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<Blog, RepoError> {
        let updated_at: DateTimeWithTimeZone = updated_at.into();
        let result = BlogEntity::update_many()
            .col_expr(blog::Column::Published, Expr::value(published))
            .col_expr(blog::Column::UpdatedAt, Expr::value(updated_at))
            .filter(blog::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        result
            .into_iter()
            .next()
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn find_related(&self, blog: &Blog, limit: u64) -> Result<Vec<BlogSummary>, RepoError> {
        if blog.tags.is_empty() {
            return Ok(Vec::new());
        }

        let result = BlogEntity::find()
            .select_only()
            .columns(SummaryRow::COLUMNS)
            .filter(blog::Column::Id.ne(blog.id))
            .filter(blog::Column::Published.eq(true))
            .filter(Expr::cust_with_values("tags && $1", [blog.tags.clone()]))
            .order_by_desc(blog::Column::CreatedAt)
            .limit(limit)
            .into_model::<SummaryRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl VisitorRepository for PostgresVisitorRepository {
    async fn list(&self, query: &VisitorQuery, limit: u64) -> Result<Vec<Visitor>, RepoError> {
        let mut select = VisitorEntity::find();
        if let Some(country) = &query.country {
            select = select.filter(visitor::Column::Country.eq(country.as_str()));
        }

        let result = select
            .order_by_desc(visitor::Column::VisitedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(count = result.len(), country = ?query.country, "Fetched visitors");
        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn countries(&self) -> Result<Vec<String>, RepoError> {
        VisitorEntity::find()
            .select_only()
            .column(visitor::Column::Country)
            .distinct()
            .filter(visitor::Column::Country.is_not_null())
            .filter(visitor::Column::Country.ne(UNKNOWN_COUNTRY))
            .filter(visitor::Column::Country.ne(""))
            .order_by_asc(visitor::Column::Country)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn stats(&self) -> Result<VisitorStats, RepoError> {
        let total = VisitorEntity::find()
            .count(&self.db)
            .await
            .map_err(map_db_err)?;
        let with_email = VisitorEntity::find()
            .filter(visitor::Column::Email.is_not_null())
            .count(&self.db)
            .await
            .map_err(map_db_err)?;
        let cookies_accepted = VisitorEntity::find()
            .filter(visitor::Column::CookiesAccepted.eq(true))
            .count(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(VisitorStats {
            total,
            with_email,
            cookies_accepted,
        })
    }
}
