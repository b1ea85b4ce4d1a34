use axum::{extract::State, Json};
use chrono::Utc;
use tracing::warn;

use service::stats::{self, DashboardStats};

use crate::{errors::JsonApiError, routes::AppState};

#[utoipa::path(
    get, path = "/api/dashboard/stats/", tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard aggregate", body = crate::openapi::DashboardStatsDoc),
        (status = 400, description = "Aggregate failed its consistency check"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, JsonApiError> {
    let today = Utc::now().date_naive();
    let stats = stats::compute_dashboard_stats(&state.db, today).await?;
    if let Err(e) = stats.validate() {
        warn!(error = %e, "dashboard stats rejected");
        return Err(e.into());
    }
    Ok(Json(stats))
}
