use axum::{extract::{Path, Query, State}, http::{HeaderMap, Uri}, Json};
use serde::Deserialize;
use tracing::info;

use service::{db::projects as queries, pagination::Pagination};

use crate::{
    errors::JsonApiError,
    links,
    presentation::{Paginated, ProjectOut},
    routes::AppState,
};

/// Raw strings so malformed values fall back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectListQuery {
    /// Case-insensitive substring of the technologies field
    pub technology: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    /// Items per page (default 10, max 100)
    pub page_size: Option<String>,
}

#[utoipa::path(
    get, path = "/api/projects/", tag = "projects",
    params(ProjectListQuery),
    responses(
        (status = 200, description = "Paginated projects", body = crate::openapi::PaginatedProjectsDoc),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    Query(q): Query<ProjectListQuery>,
) -> Result<Json<Paginated<ProjectOut>>, JsonApiError> {
    let opts = Pagination::from_query(q.page.as_deref(), q.page_size.as_deref());
    let page = queries::list_projects(&state.db, q.technology.as_deref(), opts).await?;
    info!(count = page.count, page = page.page, technology = ?q.technology, "list projects");

    let origin = links::request_origin(state.public_base_url.as_deref(), &headers)?;
    let (next, previous) = links::page_links(&origin, &uri, &page);
    let page = page.map(|m| ProjectOut::from_model(m, &origin, &state.media_url_prefix));
    Ok(Json(Paginated::new(page, next, previous)))
}

#[utoipa::path(
    get, path = "/api/projects/{id}/", tag = "projects",
    params(("id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project", body = ProjectOut),
        (status = 404, description = "Unknown project")
    )
)]
pub async fn detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Json<ProjectOut>, JsonApiError> {
    let model = queries::get_project(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("project"))?;
    let origin = links::request_origin(state.public_base_url.as_deref(), &headers)?;
    Ok(Json(ProjectOut::from_model(model, &origin, &state.media_url_prefix)))
}
