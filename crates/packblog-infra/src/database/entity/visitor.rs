//! Visitor entity for SeaORM. Rows are written by the site's tracking
//! endpoint, outside this service.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use packblog_core::domain::Visitor;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "visitors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub ip: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub cookies_accepted: bool,
    pub visited_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Visitor {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            ip: model.ip,
            country: model.country,
            city: model.city,
            email: model.email,
            cookies_accepted: model.cookies_accepted,
            visited_at: model.visited_at.into(),
        }
    }
}

impl From<Visitor> for ActiveModel {
    fn from(visitor: Visitor) -> Self {
        Self {
            id: Set(visitor.id),
            ip: Set(visitor.ip),
            country: Set(visitor.country),
            city: Set(visitor.city),
            email: Set(visitor.email),
            cookies_accepted: Set(visitor.cookies_accepted),
            visited_at: Set(visitor.visited_at.into()),
        }
    }
}
