use axum::{extract::{Path, State}, Json};
use tracing::info;

use service::db::services as queries;

use crate::{errors::JsonApiError, presentation::ServiceOut, routes::AppState};

#[utoipa::path(
    get, path = "/api/services/", tag = "services",
    responses(
        (status = 200, description = "Active services in display order", body = [ServiceOut]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ServiceOut>>, JsonApiError> {
    let rows = queries::list_active_services(&state.db).await?;
    info!(count = rows.len(), "list services");
    Ok(Json(rows.into_iter().map(ServiceOut::from).collect()))
}

#[utoipa::path(
    get, path = "/api/services/{id}/", tag = "services",
    params(("id" = i32, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service", body = ServiceOut),
        (status = 404, description = "Unknown or inactive service")
    )
)]
pub async fn detail(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<ServiceOut>, JsonApiError> {
    queries::get_active_service(&state.db, id)
        .await?
        .map(|m| Json(ServiceOut::from(m)))
        .ok_or_else(|| JsonApiError::not_found("service"))
}
