//! Create `testimonials` table.
//! `rating` is constrained to 1..=5 at the table level as well as in the model layer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Testimonials::Table)
                    .if_not_exists()
                    .col(pk_auto(Testimonials::Id))
                    .col(string_len(Testimonials::Author, 100))
                    .col(string_len(Testimonials::Position, 100))
                    .col(string_len(Testimonials::Company, 100))
                    .col(text(Testimonials::Content))
                    .col(
                        integer(Testimonials::Rating)
                            .check(Expr::col(Testimonials::Rating).between(1, 5)),
                    )
                    .col(boolean(Testimonials::IsApproved).default(false))
                    .col(timestamp_with_time_zone(Testimonials::CreatedAt))
                    .col(timestamp_with_time_zone(Testimonials::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Testimonials::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Testimonials {
    Table,
    Id,
    Author,
    Position,
    Company,
    Content,
    Rating,
    IsApproved,
    CreatedAt,
    UpdatedAt,
}
