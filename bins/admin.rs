//! Administrative console: schema migrations and content maintenance.

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use models::{projects, services, testimonials};
use service::db::{projects as project_queries, services as service_queries, testimonials as testimonial_queries};

#[derive(Parser)]
#[command(name = "admin")]
#[command(about = "Manage showcase content and the database schema")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply, roll back or inspect schema migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Manage offered services
    Services {
        #[command(subcommand)]
        action: ServiceAction,
    },
    /// Manage portfolio projects
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// Moderate client testimonials
    Testimonials {
        #[command(subcommand)]
        action: TestimonialAction,
    },
    /// Print the dashboard aggregate as JSON
    Stats,
}

#[derive(Subcommand)]
enum MigrateAction {
    Up,
    /// Roll back the most recent migration
    Down,
    Status,
}

#[derive(Subcommand)]
enum ServiceAction {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Add(AddService),
    /// Change where a service appears in the public list
    SetOrder { id: i32, display_order: i32 },
    Activate {
        #[arg(required = true)]
        ids: Vec<i32>,
    },
    Deactivate {
        #[arg(required = true)]
        ids: Vec<i32>,
    },
    Delete { id: i32 },
}

#[derive(Args)]
struct AddService {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    /// Icon class, e.g. "fas fa-laptop-code"
    #[arg(long)]
    icon: String,
    #[arg(long, default_value_t = 0)]
    display_order: i32,
    /// Create hidden from the public list
    #[arg(long)]
    inactive: bool,
}

#[derive(Subcommand)]
enum ProjectAction {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Add(AddProject),
    Delete { id: i32 },
}

#[derive(Args)]
struct AddProject {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: String,
    /// Comma-separated, e.g. "Django, React, PostgreSQL"
    #[arg(long)]
    technologies: String,
    /// YYYY-MM-DD
    #[arg(long)]
    completion_date: NaiveDate,
    /// Path relative to the media root
    #[arg(long)]
    image: Option<String>,
    #[arg(long)]
    demo_url: Option<String>,
    #[arg(long)]
    github_url: Option<String>,
}

#[derive(Subcommand)]
enum TestimonialAction {
    List {
        #[arg(long)]
        search: Option<String>,
        /// Only testimonials awaiting approval
        #[arg(long)]
        pending: bool,
    },
    Add(AddTestimonial),
    Approve {
        #[arg(required = true)]
        ids: Vec<i32>,
    },
    Unapprove {
        #[arg(required = true)]
        ids: Vec<i32>,
    },
    Delete { id: i32 },
}

#[derive(Args)]
struct AddTestimonial {
    #[arg(long)]
    author: String,
    #[arg(long)]
    position: String,
    #[arg(long)]
    company: String,
    #[arg(long)]
    content: String,
    /// 1-5
    #[arg(long)]
    rating: i32,
    #[arg(long)]
    approved: bool,
}

/// config.toml, then environment, then the local development database.
async fn connect() -> anyhow::Result<DatabaseConnection> {
    let cfg = configs::AppConfig::load_and_validate().or_else(|_| configs::AppConfig::from_env());
    match cfg {
        Ok(cfg) => models::db::connect_with_config(&cfg.database).await,
        Err(e) => {
            warn!(error = %e, "no usable configuration; using the default development database");
            models::db::connect().await.context("connecting to the default development database")
        }
    }
}

fn marker(present: bool) -> &'static str {
    if present { "yes" } else { "-" }
}

fn report(verb: &str, kind: &str, affected: u64) {
    println!("{verb} {affected} {kind}");
}

async fn migrate(db: &DatabaseConnection, action: MigrateAction) -> anyhow::Result<()> {
    match action {
        MigrateAction::Up => {
            Migrator::up(db, None).await?;
            println!("migrations applied");
        }
        MigrateAction::Down => {
            Migrator::down(db, Some(1)).await?;
            println!("rolled back one migration");
        }
        MigrateAction::Status => Migrator::status(db).await?,
    }
    Ok(())
}

async fn run_services(db: &DatabaseConnection, action: ServiceAction) -> anyhow::Result<()> {
    match action {
        ServiceAction::List { search } => {
            let rows = service_queries::search_services(db, search.as_deref()).await?;
            println!("Found {} services:", rows.len());
            for s in rows {
                println!(
                    "  ID: {}, Order: {}, Active: {}, Icon: {}, Title: {}",
                    s.id, s.display_order, marker(s.is_active), s.icon, s.title
                );
            }
        }
        ServiceAction::Add(a) => {
            let created = services::create(
                db,
                services::NewService {
                    title: a.title,
                    description: a.description,
                    icon: a.icon,
                    display_order: a.display_order,
                    is_active: !a.inactive,
                },
            )
            .await?;
            info!(id = created.id, "service created");
            println!("created service {}", created.id);
        }
        ServiceAction::SetOrder { id, display_order } => {
            let updated = services::set_display_order(db, id, display_order).await?;
            println!("service {} now at position {}", updated.id, updated.display_order);
        }
        ServiceAction::Activate { ids } => report("activated", "services", services::set_active(db, &ids, true).await?),
        ServiceAction::Deactivate { ids } => {
            report("deactivated", "services", services::set_active(db, &ids, false).await?)
        }
        ServiceAction::Delete { id } => {
            let deleted = services::delete(db, id).await?;
            report("deleted", "services", u64::from(deleted));
        }
    }
    Ok(())
}

async fn run_projects(db: &DatabaseConnection, action: ProjectAction) -> anyhow::Result<()> {
    match action {
        ProjectAction::List { search } => {
            let rows = project_queries::search_projects(db, search.as_deref()).await?;
            println!("Found {} projects:", rows.len());
            for p in rows {
                println!(
                    "  ID: {}, Name: {}, Technologies: {}, Completed: {}, Demo: {}, GitHub: {}",
                    p.id,
                    p.name,
                    projects::technologies_summary(&p.technologies_list()),
                    p.completion_date,
                    marker(p.demo_url.is_some()),
                    marker(p.github_url.is_some())
                );
            }
        }
        ProjectAction::Add(a) => {
            let created = projects::create(
                db,
                projects::NewProject {
                    name: a.name,
                    description: a.description,
                    image: a.image,
                    technologies: a.technologies,
                    demo_url: a.demo_url,
                    github_url: a.github_url,
                    completion_date: a.completion_date,
                },
            )
            .await?;
            info!(id = created.id, "project created");
            println!("created project {}", created.id);
        }
        ProjectAction::Delete { id } => {
            let deleted = projects::delete(db, id).await?;
            report("deleted", "projects", u64::from(deleted));
        }
    }
    Ok(())
}

async fn run_testimonials(db: &DatabaseConnection, action: TestimonialAction) -> anyhow::Result<()> {
    match action {
        TestimonialAction::List { search, pending } => {
            let rows = testimonial_queries::search_testimonials(db, search.as_deref(), pending).await?;
            println!("Found {} testimonials:", rows.len());
            for t in rows {
                println!(
                    "  ID: {}, Author: {}, Company: {}, Rating: {}, Approved: {}, Created: {}",
                    t.id,
                    t.author,
                    t.company,
                    t.rating_stars(),
                    marker(t.is_approved),
                    t.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        TestimonialAction::Add(a) => {
            let created = testimonials::create(
                db,
                testimonials::NewTestimonial {
                    author: a.author,
                    position: a.position,
                    company: a.company,
                    content: a.content,
                    rating: a.rating,
                    is_approved: a.approved,
                },
            )
            .await?;
            info!(id = created.id, "testimonial created");
            println!("created testimonial {}", created.id);
        }
        TestimonialAction::Approve { ids } => {
            report("approved", "testimonials", testimonials::set_approved(db, &ids, true).await?)
        }
        TestimonialAction::Unapprove { ids } => {
            report("unapproved", "testimonials", testimonials::set_approved(db, &ids, false).await?)
        }
        TestimonialAction::Delete { id } => {
            let deleted = testimonials::delete(db, id).await?;
            report("deleted", "testimonials", u64::from(deleted));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_default();

    let cli = Cli::parse();
    let db = connect().await?;

    match cli.command {
        Commands::Migrate { action } => migrate(&db, action).await?,
        Commands::Services { action } => run_services(&db, action).await?,
        Commands::Projects { action } => run_projects(&db, action).await?,
        Commands::Testimonials { action } => run_testimonials(&db, action).await?,
        Commands::Stats => {
            let stats = service::stats::compute_dashboard_stats(&db, Utc::now().date_naive()).await?;
            stats.validate()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bulk_and_dated_arguments() {
        let cli = Cli::try_parse_from(["admin", "testimonials", "approve", "3", "4"]).unwrap();
        assert!(matches!(cli.command, Commands::Testimonials { action: TestimonialAction::Approve { ids } } if ids == vec![3, 4]));

        let cli = Cli::try_parse_from([
            "admin", "projects", "add", "--name", "Portal", "--description", "d",
            "--technologies", "Django, React", "--completion-date", "2024-03-01",
        ])
        .unwrap();
        match cli.command {
            Commands::Projects { action: ProjectAction::Add(a) } => {
                assert_eq!(a.completion_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
                assert!(a.image.is_none());
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn bulk_commands_require_ids() {
        assert!(Cli::try_parse_from(["admin", "services", "activate"]).is_err());
        assert!(Cli::try_parse_from(["admin", "services", "set-order", "1", "2"]).is_ok());
    }
}
