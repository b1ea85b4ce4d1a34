//! Client testimonials. Only approved ones are ever published.

use chrono::Utc;
use sea_orm::{entity::prelude::*, sea_query::Expr, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "testimonials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author: String,
    pub position: String,
    pub company: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub rating: i32,
    pub is_approved: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn rating_stars(&self) -> String {
        rating_stars(self.rating)
    }
}

/// `rating` filled stars followed by empty ones; always five glyphs.
pub fn rating_stars(rating: i32) -> String {
    let filled = rating.clamp(0, MAX_RATING) as usize;
    let mut s = "★".repeat(filled);
    s.push_str(&"☆".repeat(MAX_RATING as usize - filled));
    s
}

pub fn validate_rating(rating: i32) -> Result<(), ModelError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ModelError::Validation(format!("rating must be between {MIN_RATING} and {MAX_RATING}")));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTestimonial {
    pub author: String,
    pub position: String,
    pub company: String,
    pub content: String,
    pub rating: i32,
    #[serde(default)]
    pub is_approved: bool,
}

pub async fn create(db: &DatabaseConnection, input: NewTestimonial) -> Result<Model, ModelError> {
    errors::require_text("author", &input.author, 100)?;
    errors::require_text("position", &input.position, 100)?;
    errors::require_text("company", &input.company, 100)?;
    errors::require_text("content", &input.content, usize::MAX)?;
    validate_rating(input.rating)?;

    let now = Utc::now().into();
    let am = ActiveModel {
        author: Set(input.author.trim().to_string()),
        position: Set(input.position.trim().to_string()),
        company: Set(input.company.trim().to_string()),
        content: Set(input.content),
        rating: Set(input.rating),
        is_approved: Set(input.is_approved),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Moderation action: approve or withdraw a batch; returns rows touched.
pub async fn set_approved(db: &DatabaseConnection, ids: &[i32], approved: bool) -> Result<u64, ModelError> {
    if ids.is_empty() {
        return Ok(0);
    }
    let now: DateTimeWithTimeZone = Utc::now().into();
    let res = Entity::update_many()
        .col_expr(Column::IsApproved, Expr::value(approved))
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
