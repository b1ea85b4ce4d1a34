use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::presentation::{ProjectOut, ServiceOut, TestimonialOut};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// `{count, next, previous, results}` for `/api/projects/`.
#[derive(ToSchema)]
pub struct PaginatedProjectsDoc {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<ProjectOut>,
}

/// `{count, next, previous, results}` for `/api/testimonials/`.
#[derive(ToSchema)]
pub struct PaginatedTestimonialsDoc {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<TestimonialOut>,
}

#[derive(ToSchema)]
pub struct ServiceStatsDoc { pub total_services: u64, pub active_services: u64, pub inactive_services: u64 }

#[derive(ToSchema)]
pub struct ProjectStatsDoc { pub total_projects: u64, pub recent_projects: u64 }

#[derive(ToSchema)]
pub struct TestimonialStatsDoc {
    pub total_testimonials: u64,
    pub approved_testimonials: u64,
    pub pending_testimonials: u64,
    pub average_rating: f64,
}

#[derive(ToSchema)]
pub struct RatingBucketDoc { pub rating: i32, pub count: u64 }

#[derive(ToSchema)]
pub struct DashboardStatsDoc {
    pub services: ServiceStatsDoc,
    pub projects: ProjectStatsDoc,
    pub testimonials: TestimonialStatsDoc,
    pub rating_distribution: Vec<RatingBucketDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::overview::overview,
        crate::routes::services::list,
        crate::routes::services::detail,
        crate::routes::projects::list,
        crate::routes::projects::detail,
        crate::routes::testimonials::list,
        crate::routes::testimonials::detail,
        crate::routes::dashboard::stats,
    ),
    components(
        schemas(
            HealthResponse,
            ServiceOut,
            ProjectOut,
            TestimonialOut,
            PaginatedProjectsDoc,
            PaginatedTestimonialsDoc,
            ServiceStatsDoc,
            ProjectStatsDoc,
            TestimonialStatsDoc,
            RatingBucketDoc,
            DashboardStatsDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "overview"),
        (name = "services"),
        (name = "projects"),
        (name = "testimonials"),
        (name = "dashboard")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_public_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/api/", "/api/services/", "/api/projects/{id}/", "/api/dashboard/stats/"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
