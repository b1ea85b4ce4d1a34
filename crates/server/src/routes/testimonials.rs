use axum::{extract::{Path, Query, State}, http::{HeaderMap, Uri}, Json};
use serde::Deserialize;
use tracing::info;

use service::{
    db::testimonials::{self as queries, parse_min_rating},
    pagination::Pagination,
};

use crate::{
    errors::JsonApiError,
    links,
    presentation::{Paginated, TestimonialOut},
    routes::AppState,
};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TestimonialListQuery {
    /// Minimum rating 1-5; anything else is ignored
    pub min_rating: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    /// Items per page (default 10, max 100)
    pub page_size: Option<String>,
}

#[utoipa::path(
    get, path = "/api/testimonials/", tag = "testimonials",
    params(TestimonialListQuery),
    responses(
        (status = 200, description = "Paginated approved testimonials", body = crate::openapi::PaginatedTestimonialsDoc),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    Query(q): Query<TestimonialListQuery>,
) -> Result<Json<Paginated<TestimonialOut>>, JsonApiError> {
    let min_rating = parse_min_rating(q.min_rating.as_deref());
    let opts = Pagination::from_query(q.page.as_deref(), q.page_size.as_deref());
    let page = queries::list_testimonials(&state.db, min_rating, opts).await?;
    info!(count = page.count, page = page.page, min_rating = ?min_rating, "list testimonials");

    let origin = links::request_origin(state.public_base_url.as_deref(), &headers)?;
    let (next, previous) = links::page_links(&origin, &uri, &page);
    Ok(Json(Paginated::new(page.map(TestimonialOut::from), next, previous)))
}

#[utoipa::path(
    get, path = "/api/testimonials/{id}/", tag = "testimonials",
    params(("id" = i32, Path, description = "Testimonial id")),
    responses(
        (status = 200, description = "Testimonial", body = TestimonialOut),
        (status = 404, description = "Unknown or unapproved testimonial")
    )
)]
pub async fn detail(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<TestimonialOut>, JsonApiError> {
    queries::get_approved_testimonial(&state.db, id)
        .await?
        .map(|m| Json(TestimonialOut::from(m)))
        .ok_or_else(|| JsonApiError::not_found("testimonial"))
}
