#![cfg(test)]
use chrono::NaiveDate;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use configs::DatabaseConfig;
use models::{db::connect_with_config, projects, services, testimonials};

/// Fresh in-memory database with all migrations applied; each test gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..DatabaseConfig::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn seed_service(db: &DatabaseConnection, title: &str, order: i32, active: bool) -> Result<services::Model, anyhow::Error> {
    Ok(services::create(
        db,
        services::NewService {
            title: title.into(),
            description: format!("{title} description"),
            icon: "fas fa-cog".into(),
            display_order: order,
            is_active: active,
        },
    )
    .await?)
}

pub async fn seed_project(db: &DatabaseConnection, name: &str, technologies: &str, completed: NaiveDate) -> Result<projects::Model, anyhow::Error> {
    Ok(projects::create(
        db,
        projects::NewProject {
            name: name.into(),
            description: format!("{name} description"),
            image: None,
            technologies: technologies.into(),
            demo_url: None,
            github_url: None,
            completion_date: completed,
        },
    )
    .await?)
}

pub async fn seed_testimonial(db: &DatabaseConnection, author: &str, rating: i32, approved: bool) -> Result<testimonials::Model, anyhow::Error> {
    Ok(testimonials::create(
        db,
        testimonials::NewTestimonial {
            author: author.into(),
            position: "Manager".into(),
            company: "Acme".into(),
            content: "Reliable partner".into(),
            rating,
            is_approved: approved,
        },
    )
    .await?)
}
