//! Create `projects` table.
//! `technologies` is stored as the raw comma-separated string; the list form is derived on read.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(pk_auto(Projects::Id))
                    .col(string_len(Projects::Name, 200))
                    .col(text(Projects::Description))
                    .col(string_len_null(Projects::Image, 255))
                    .col(string_len(Projects::Technologies, 300))
                    .col(string_len_null(Projects::DemoUrl, 200))
                    .col(string_len_null(Projects::GithubUrl, 200))
                    .col(date(Projects::CompletionDate))
                    .col(timestamp_with_time_zone(Projects::CreatedAt))
                    .col(timestamp_with_time_zone(Projects::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Projects::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Name,
    Description,
    Image,
    Technologies,
    DemoUrl,
    GithubUrl,
    CompletionDate,
    CreatedAt,
    UpdatedAt,
}
