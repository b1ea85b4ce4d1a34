//! Migrator registering one table per content entity.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_services;
mod m20240301_000002_create_projects;
mod m20240301_000003_create_testimonials;
mod m20240301_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_services::Migration),
            Box::new(m20240301_000002_create_projects::Migration),
            Box::new(m20240301_000003_create_testimonials::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000010_add_indexes::Migration),
        ]
    }
}
