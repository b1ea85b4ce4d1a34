use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use models::testimonials::{self, MAX_RATING, MIN_RATING};
use crate::{
    db::{contains_ci, fetch_page},
    errors::ServiceError,
    pagination::{Page, Pagination},
};

/// Lenient `min_rating` parsing: anything that is not an integer within the rating
/// range yields `None`, which means "no rating filter".
pub fn parse_min_rating(raw: Option<&str>) -> Option<i32> {
    raw.and_then(|r| r.trim().parse::<i32>().ok())
        .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
}

/// Approved testimonials, newest first, optionally limited to `rating >= min_rating`.
pub async fn list_testimonials(
    db: &DatabaseConnection,
    min_rating: Option<i32>,
    opts: Pagination,
) -> Result<Page<testimonials::Model>, ServiceError> {
    let mut q = testimonials::Entity::find().filter(testimonials::Column::IsApproved.eq(true));
    if let Some(min) = min_rating {
        q = q.filter(testimonials::Column::Rating.gte(min));
    }
    let q = q
        .order_by_desc(testimonials::Column::CreatedAt)
        .order_by_desc(testimonials::Column::Id);
    fetch_page(db, q, opts).await
}

/// Single approved testimonial; pending ones are treated as absent.
pub async fn get_approved_testimonial(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<testimonials::Model>, ServiceError> {
    testimonials::Entity::find_by_id(id)
        .filter(testimonials::Column::IsApproved.eq(true))
        .one(db)
        .await
        .map_err(ServiceError::db)
}

/// Admin listing over author, company and content, optionally only those awaiting moderation.
pub async fn search_testimonials(
    db: &DatabaseConnection,
    term: Option<&str>,
    pending_only: bool,
) -> Result<Vec<testimonials::Model>, ServiceError> {
    let mut q = testimonials::Entity::find();
    if pending_only {
        q = q.filter(testimonials::Column::IsApproved.eq(false));
    }
    if let Some(term) = term.filter(|t| !t.trim().is_empty()) {
        q = q.filter(
            Condition::any()
                .add(contains_ci(testimonials::Column::Author, term))
                .add(contains_ci(testimonials::Column::Company, term))
                .add(contains_ci(testimonials::Column::Content, term)),
        );
    }
    q.order_by_desc(testimonials::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ServiceError::db)
}
