//! Portfolio projects. `technologies` is stored as typed in by editors
//! ("Django, React, PostgreSQL"); the list form is always derived.

use chrono::{NaiveDate, Utc};
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Path of the uploaded image relative to the media root.
    pub image: Option<String>,
    pub technologies: String,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub completion_date: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn technologies_list(&self) -> Vec<String> {
        technologies_list(&self.technologies)
    }
}

/// Split on commas, trim each segment and drop the empty ones, keeping order.
pub fn technologies_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Short form used in admin listings: at most three names, then a `(+n)` tail.
pub fn technologies_summary(list: &[String]) -> String {
    if list.len() <= 3 {
        return list.join(", ");
    }
    format!("{}... (+{})", list[..3].join(", "), list.len() - 3)
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub technologies: String,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    pub completion_date: NaiveDate,
}

pub fn validate_image_path(p: &str) -> Result<(), ModelError> {
    if p.starts_with('/') || p.split('/').any(|seg| seg == "..") {
        return Err(ModelError::Validation("image must be a relative path inside the media root".into()));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, input: NewProject) -> Result<Model, ModelError> {
    errors::require_text("name", &input.name, 200)?;
    errors::require_text("description", &input.description, usize::MAX)?;
    errors::require_text("technologies", &input.technologies, 300)?;
    if technologies_list(&input.technologies).is_empty() {
        return Err(ModelError::Validation("technologies must name at least one technology".into()));
    }
    let image = input.image.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
    if let Some(p) = &image {
        validate_image_path(p)?;
    }
    let demo_url = errors::optional_url("demo_url", input.demo_url.as_deref())?;
    let github_url = errors::optional_url("github_url", input.github_url.as_deref())?;

    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(input.name.trim().to_string()),
        description: Set(input.description),
        image: Set(image),
        technologies: Set(input.technologies),
        demo_url: Set(demo_url),
        github_url: Set(github_url),
        completion_date: Set(input.completion_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
