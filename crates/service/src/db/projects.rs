use sea_orm::{Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use models::projects;
use crate::{
    db::{contains_ci, fetch_page},
    errors::ServiceError,
    pagination::{Page, Pagination},
};

/// All projects, newest completion first, optionally narrowed to those whose
/// `technologies` mention `technology` (case-insensitive substring). An empty
/// `technology` applies no filter.
pub async fn list_projects(
    db: &DatabaseConnection,
    technology: Option<&str>,
    opts: Pagination,
) -> Result<Page<projects::Model>, ServiceError> {
    let mut q = projects::Entity::find();
    if let Some(tech) = technology.filter(|t| !t.is_empty()) {
        debug!(technology = %tech, "filtering projects by technology");
        q = q.filter(contains_ci(projects::Column::Technologies, tech));
    }
    let q = q
        .order_by_desc(projects::Column::CompletionDate)
        .order_by_asc(projects::Column::Name)
        .order_by_asc(projects::Column::Id);
    fetch_page(db, q, opts).await
}

pub async fn get_project(db: &DatabaseConnection, id: i32) -> Result<Option<projects::Model>, ServiceError> {
    projects::Entity::find_by_id(id).one(db).await.map_err(ServiceError::db)
}

/// Admin listing over name, description and technologies.
pub async fn search_projects(db: &DatabaseConnection, term: Option<&str>) -> Result<Vec<projects::Model>, ServiceError> {
    let mut q = projects::Entity::find();
    if let Some(term) = term.filter(|t| !t.trim().is_empty()) {
        q = q.filter(
            Condition::any()
                .add(contains_ci(projects::Column::Name, term))
                .add(contains_ci(projects::Column::Description, term))
                .add(contains_ci(projects::Column::Technologies, term)),
        );
    }
    q.order_by_desc(projects::Column::CompletionDate)
        .order_by_asc(projects::Column::Name)
        .all(db)
        .await
        .map_err(ServiceError::db)
}
