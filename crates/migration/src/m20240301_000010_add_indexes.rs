use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Services: public listing filters on is_active and sorts by display_order
        manager
            .create_index(
                Index::create()
                    .name("idx_services_active_order")
                    .table(Services::Table)
                    .col(Services::IsActive)
                    .col(Services::DisplayOrder)
                    .to_owned(),
            )
            .await?;

        // Projects: default ordering and the 30-day window both use completion_date
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_completion_date")
                    .table(Projects::Table)
                    .col(Projects::CompletionDate)
                    .to_owned(),
            )
            .await?;

        // Testimonials: approved listing + rating filter
        manager
            .create_index(
                Index::create()
                    .name("idx_testimonials_approved_rating")
                    .table(Testimonials::Table)
                    .col(Testimonials::IsApproved)
                    .col(Testimonials::Rating)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_testimonials_created_at")
                    .table(Testimonials::Table)
                    .col(Testimonials::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_services_active_order").table(Services::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_projects_completion_date").table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_testimonials_approved_rating").table(Testimonials::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_testimonials_created_at").table(Testimonials::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Services { Table, IsActive, DisplayOrder }

#[derive(DeriveIden)]
enum Projects { Table, CompletionDate }

#[derive(DeriveIden)]
enum Testimonials { Table, IsApproved, Rating, CreatedAt }
