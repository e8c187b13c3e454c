use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Visitors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Visitors::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Visitors::Ip).string().not_null())
                    .col(ColumnDef::new(Visitors::Country).string())
                    .col(ColumnDef::new(Visitors::City).string())
                    .col(ColumnDef::new(Visitors::Email).string())
                    .col(
                        ColumnDef::new(Visitors::CookiesAccepted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Visitors::VisitedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_visitors_visited_at")
                    .table(Visitors::Table)
                    .col(Visitors::VisitedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_visitors_country")
                    .table(Visitors::Table)
                    .col(Visitors::Country)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Visitors::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Visitors {
    Table,
    Id,
    Ip,
    Country,
    City,
    Email,
    CookiesAccepted,
    VisitedAt,
}
