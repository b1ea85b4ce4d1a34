pub mod overview;
pub mod services;
pub mod projects;
pub mod testimonials;
pub mod dashboard;

use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;

/// Per-process state shared by every handler. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Origin for absolute links; `None` means derive it from the request.
    pub public_base_url: Option<String>,
    /// URL prefix under which media assets are served, with leading and trailing `/`.
    pub media_url_prefix: String,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public read API, media files, OpenAPI docs.
pub fn build_router(state: AppState, cors: CorsLayer, media_root: &str) -> Router {
    let media_mount = state.media_url_prefix.trim_end_matches('/').to_string();

    let api = Router::new()
        .route("/api/", get(overview::overview))
        .route("/api/services/", get(services::list))
        .route("/api/services/:id/", get(services::detail))
        .route("/api/projects/", get(projects::list))
        .route("/api/projects/:id/", get(projects::detail))
        .route("/api/testimonials/", get(testimonials::list))
        .route("/api/testimonials/:id/", get(testimonials::detail))
        .route("/api/dashboard/stats/", get(dashboard::stats));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest_service(&media_mount, ServeDir::new(media_root))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx as ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
