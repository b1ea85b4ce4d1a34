//! Offered services, listed on the site by `display_order` then `title`.

use chrono::Utc;
use sea_orm::{entity::prelude::*, sea_query::Expr, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Icon class, e.g. `fas fa-laptop-code`.
    pub icon: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize)]
pub struct NewService {
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool { true }

pub fn validate(input: &NewService) -> Result<(), ModelError> {
    errors::require_text("title", &input.title, 200)?;
    errors::require_text("description", &input.description, usize::MAX)?;
    errors::require_text("icon", &input.icon, 50)?;
    Ok(())
}

pub async fn create(db: &DatabaseConnection, input: NewService) -> Result<Model, ModelError> {
    validate(&input)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        title: Set(input.title.trim().to_string()),
        description: Set(input.description),
        icon: Set(input.icon.trim().to_string()),
        display_order: Set(input.display_order),
        is_active: Set(input.is_active),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn set_display_order(db: &DatabaseConnection, id: i32, display_order: i32) -> Result<Model, ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::Validation("service not found".into()))?
        .into();
    found.display_order = Set(display_order);
    found.updated_at = Set(Utc::now().into());
    Ok(found.update(db).await?)
}

/// Bulk toggle of the `is_active` flag; returns the number of rows touched.
pub async fn set_active(db: &DatabaseConnection, ids: &[i32], active: bool) -> Result<u64, ModelError> {
    if ids.is_empty() {
        return Ok(0);
    }
    let now: DateTimeWithTimeZone = Utc::now().into();
    let res = Entity::update_many()
        .col_expr(Column::IsActive, Expr::value(active))
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::Id.is_in(ids.to_vec()))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_db::memory_db;

    fn sample(title: &str, order: i32, active: bool) -> NewService {
        NewService {
            title: title.into(),
            description: "Full-stack delivery".into(),
            icon: "fas fa-laptop-code".into(),
            display_order: order,
            is_active: active,
        }
    }

    #[test]
    fn validate_rejects_long_icon() {
        let mut s = sample("Web", 0, true);
        s.icon = "x".repeat(51);
        assert!(matches!(validate(&s), Err(ModelError::Validation(_))));
    }

    #[test]
    fn new_service_defaults_from_json() {
        let s: NewService = serde_json::from_str(r#"{"title":"Web","description":"d","icon":"fa"}"#).unwrap();
        assert_eq!(s.display_order, 0);
        assert!(s.is_active);
    }

    #[tokio::test]
    async fn create_toggle_and_delete() -> anyhow::Result<()> {
        let db = memory_db().await?;
        let a = create(&db, sample("Web", 1, true)).await?;
        let b = create(&db, sample("Mobile", 2, true)).await?;
        assert!(a.id > 0 && b.id > a.id);

        let touched = set_active(&db, &[a.id, b.id], false).await?;
        assert_eq!(touched, 2);
        let reloaded = Entity::find_by_id(a.id).one(&db).await?.unwrap();
        assert!(!reloaded.is_active);

        let moved = set_display_order(&db, b.id, -1).await?;
        assert_eq!(moved.display_order, -1);

        assert!(delete(&db, a.id).await?);
        assert!(!delete(&db, a.id).await?);
        Ok(())
    }
}
