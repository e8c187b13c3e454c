//! Schema migrations for the blog and visitor tables.

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_blogs_table;
mod m20250101_000002_create_visitors_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_blogs_table::Migration),
            Box::new(m20250101_000002_create_visitors_table::Migration),
        ]
    }
}
