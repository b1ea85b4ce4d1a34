use std::net::SocketAddr;

use axum::Router;
use common::{env::ensure_media_root, utils::logging::init_logging_from_env};
use configs::AppConfig;
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

/// Read-only API, so any origin may read it.
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// TOML config when present, otherwise environment variables only.
fn load_config() -> Result<AppConfig, StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(file_err) => {
            warn!(error = %file_err, "config file unusable; falling back to environment");
            AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
        }
    }
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Router for an already-connected database, wired the way `run` wires it.
pub fn build_app(cfg: &AppConfig, db: DatabaseConnection) -> Router {
    let state = AppState {
        db,
        public_base_url: cfg.server.public_base_url.clone(),
        media_url_prefix: cfg.media.url_prefix.clone(),
    };
    routes::build_router(state, build_cors(), &cfg.media.root)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = load_config()?;
    ensure_media_root(&cfg.media.root).await?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    Migrator::up(&db, None).await?;
    info!("schema up to date");

    let app = build_app(&cfg, db);

    let addr = bind_addr(&cfg)?;
    info!(%addr, media_root = %cfg.media.root, "starting showcase api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
