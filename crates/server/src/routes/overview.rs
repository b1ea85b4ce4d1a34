use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

/// Version of the public API contract, independent of the crate version.
pub const API_VERSION: &str = "1.0";

#[derive(Debug, Serialize)]
pub struct ApiOverview {
    pub message: &'static str,
    pub version: &'static str,
    /// category -> (label -> path)
    pub endpoints: BTreeMap<&'static str, BTreeMap<&'static str, &'static str>>,
}

fn endpoint_catalog() -> BTreeMap<&'static str, BTreeMap<&'static str, &'static str>> {
    let groups: [(&str, &[(&str, &str)]); 5] = [
        ("Services", &[
            ("List active services", "/api/services/"),
            ("Service detail", "/api/services/{id}/"),
        ]),
        ("Projects", &[
            ("List all projects", "/api/projects/"),
            ("Filter by technology", "/api/projects/?technology={tech_name}"),
            ("Project detail", "/api/projects/{id}/"),
        ]),
        ("Testimonials", &[
            ("List approved testimonials", "/api/testimonials/"),
            ("Filter by min rating", "/api/testimonials/?min_rating={1-5}"),
            ("Testimonial detail", "/api/testimonials/{id}/"),
        ]),
        ("Dashboard", &[("Statistics", "/api/dashboard/stats/")]),
        ("API Info", &[("This overview", "/api/")]),
    ];
    groups
        .into_iter()
        .map(|(category, entries)| (category, entries.iter().copied().collect()))
        .collect()
}

#[utoipa::path(get, path = "/api/", tag = "overview", responses((status = 200, description = "API overview")))]
pub async fn overview() -> Json<ApiOverview> {
    Json(ApiOverview {
        message: "Welcome to the FiiTech Solutions API",
        version: API_VERSION,
        endpoints: endpoint_catalog(),
    })
}
