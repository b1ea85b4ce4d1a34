use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use models::services;
use crate::{db::contains_ci, errors::ServiceError};

/// Active services in display order. Never paginated.
pub async fn list_active_services(db: &DatabaseConnection) -> Result<Vec<services::Model>, ServiceError> {
    services::Entity::find()
        .filter(services::Column::IsActive.eq(true))
        .order_by_asc(services::Column::DisplayOrder)
        .order_by_asc(services::Column::Title)
        .order_by_asc(services::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

/// Single active service; inactive ones are treated as absent.
pub async fn get_active_service(db: &DatabaseConnection, id: i32) -> Result<Option<services::Model>, ServiceError> {
    services::Entity::find_by_id(id)
        .filter(services::Column::IsActive.eq(true))
        .one(db)
        .await
        .map_err(ServiceError::db)
}

/// Admin listing: every row, optionally narrowed by a search over title and description.
pub async fn search_services(db: &DatabaseConnection, term: Option<&str>) -> Result<Vec<services::Model>, ServiceError> {
    let mut q = services::Entity::find();
    if let Some(term) = term.filter(|t| !t.trim().is_empty()) {
        q = q.filter(
            Condition::any()
                .add(contains_ci(services::Column::Title, term))
                .add(contains_ci(services::Column::Description, term)),
        );
    }
    q.order_by_asc(services::Column::DisplayOrder)
        .order_by_asc(services::Column::Title)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_service};

    #[tokio::test]
    async fn lists_only_active_sorted_by_order_then_title() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed_service(&db, "Zeta", 1, true).await?;
        seed_service(&db, "Alpha", 1, true).await?;
        seed_service(&db, "First", 0, true).await?;
        seed_service(&db, "Hidden", -5, false).await?;

        let list = list_active_services(&db).await?;
        let titles: Vec<_> = list.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Alpha", "Zeta"]);
        assert!(list.iter().all(|s| s.is_active));
        Ok(())
    }

    #[tokio::test]
    async fn detail_hides_inactive() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let on = seed_service(&db, "On", 0, true).await?;
        let off = seed_service(&db, "Off", 0, false).await?;
        assert!(get_active_service(&db, on.id).await?.is_some());
        assert!(get_active_service(&db, off.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn admin_search_includes_inactive() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed_service(&db, "Cloud Hosting", 0, false).await?;
        seed_service(&db, "Web Apps", 1, true).await?;
        let found = search_services(&db, Some("cloud")).await?;
        assert_eq!(found.len(), 1);
        assert_eq!(search_services(&db, None).await?.len(), 2);
        Ok(())
    }
}
