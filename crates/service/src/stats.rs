//! Dashboard statistics.
//!
//! Each figure comes from its own query and the queries are not wrapped in a transaction,
//! so an admin write landing between them can skew a complement (`inactive`, `pending`)
//! for that one response. `approved`, `average_rating` and `rating_distribution` are all
//! derived from the same grouped query and always agree with each other.

use std::cmp::Ordering;

use chrono::{Duration, NaiveDate};
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use models::{projects, services, testimonials};
use crate::errors::ServiceError;

/// Projects completed within this many days (inclusive) count as recent.
pub const RECENT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStats {
    #[serde(rename = "total_services")]
    pub total: u64,
    #[serde(rename = "active_services")]
    pub active: u64,
    #[serde(rename = "inactive_services")]
    pub inactive: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStats {
    #[serde(rename = "total_projects")]
    pub total: u64,
    #[serde(rename = "recent_projects")]
    pub recent: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestimonialStats {
    #[serde(rename = "total_testimonials")]
    pub total: u64,
    #[serde(rename = "approved_testimonials")]
    pub approved: u64,
    #[serde(rename = "pending_testimonials")]
    pub pending: u64,
    pub average_rating: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBucket {
    pub rating: i32,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub services: ServiceStats,
    pub projects: ProjectStats,
    pub testimonials: TestimonialStats,
    pub rating_distribution: Vec<RatingBucket>,
}

/// First completion date that still counts as recent for `today`.
pub fn recent_cutoff(today: NaiveDate) -> NaiveDate {
    today - Duration::days(RECENT_WINDOW_DAYS)
}

/// `sum / count` rounded to 2 decimals, exact halves to even.
/// Works on the integer ratio so halves like 4.125 are detected exactly.
pub fn mean_2dp_half_even(sum: u64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let scaled = u128::from(sum) * 100;
    let count = u128::from(count);
    let (mut q, r) = (scaled / count, scaled % count);
    match (2 * r).cmp(&count) {
        Ordering::Greater => q += 1,
        Ordering::Equal if q % 2 == 1 => q += 1,
        _ => {}
    }
    q as f64 / 100.0
}

/// Approved count and mean rating (2 decimals, 0 when empty) from a rating histogram.
pub fn summarize_ratings(buckets: &[RatingBucket]) -> (u64, f64) {
    let approved: u64 = buckets.iter().map(|b| b.count).sum();
    let weighted: u64 = buckets.iter().map(|b| b.rating.max(0) as u64 * b.count).sum();
    (approved, mean_2dp_half_even(weighted, approved))
}

impl DashboardStats {
    /// Assemble the aggregate from raw counts and the approved-rating histogram.
    pub fn from_parts(
        services_total: u64,
        services_active: u64,
        projects_total: u64,
        projects_recent: u64,
        testimonials_total: u64,
        rating_distribution: Vec<RatingBucket>,
    ) -> Self {
        let (approved, average_rating) = summarize_ratings(&rating_distribution);
        Self {
            services: ServiceStats {
                total: services_total,
                active: services_active,
                inactive: services_total.saturating_sub(services_active),
            },
            projects: ProjectStats { total: projects_total, recent: projects_recent },
            testimonials: TestimonialStats {
                total: testimonials_total,
                approved,
                pending: testimonials_total.saturating_sub(approved),
                average_rating,
            },
            rating_distribution,
        }
    }

    /// Internal consistency check run before the aggregate is returned.
    pub fn validate(&self) -> Result<(), ServiceError> {
        let s = &self.services;
        if s.active > s.total || s.active + s.inactive != s.total {
            return Err(ServiceError::Validation(format!(
                "services: active ({}) and inactive ({}) do not add up to total ({})",
                s.active, s.inactive, s.total
            )));
        }
        if self.projects.recent > self.projects.total {
            return Err(ServiceError::Validation(format!(
                "projects: recent ({}) exceeds total ({})",
                self.projects.recent, self.projects.total
            )));
        }
        let t = &self.testimonials;
        if t.approved > t.total || t.approved + t.pending != t.total {
            return Err(ServiceError::Validation(format!(
                "testimonials: approved ({}) and pending ({}) do not add up to total ({})",
                t.approved, t.pending, t.total
            )));
        }
        let max = testimonials::MAX_RATING as f64;
        if !(0.0..=max).contains(&t.average_rating) {
            return Err(ServiceError::Validation(format!(
                "testimonials: average_rating {} outside 0..={}",
                t.average_rating, max
            )));
        }
        let mut prev = 0;
        for b in &self.rating_distribution {
            if b.rating <= prev || b.rating > testimonials::MAX_RATING || b.count == 0 {
                return Err(ServiceError::Validation(format!(
                    "rating_distribution: invalid bucket {{rating: {}, count: {}}}",
                    b.rating, b.count
                )));
            }
            prev = b.rating;
        }
        Ok(())
    }
}

/// Approved testimonials grouped by rating, ascending; absent ratings produce no bucket.
pub async fn rating_distribution(db: &DatabaseConnection) -> Result<Vec<RatingBucket>, ServiceError> {
    let rows: Vec<(i32, i64)> = testimonials::Entity::find()
        .select_only()
        .column(testimonials::Column::Rating)
        .column_as(Expr::col(testimonials::Column::Id).count(), "count")
        .filter(testimonials::Column::IsApproved.eq(true))
        .group_by(testimonials::Column::Rating)
        .order_by_asc(testimonials::Column::Rating)
        .into_tuple()
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(rows
        .into_iter()
        .map(|(rating, count)| RatingBucket { rating, count: count.max(0) as u64 })
        .collect())
}

/// Compute the dashboard aggregate as of `today`.
#[instrument(skip(db))]
pub async fn compute_dashboard_stats(db: &DatabaseConnection, today: NaiveDate) -> Result<DashboardStats, ServiceError> {
    let services_total = services::Entity::find().count(db).await.map_err(ServiceError::db)?;
    let services_active = services::Entity::find()
        .filter(services::Column::IsActive.eq(true))
        .count(db)
        .await
        .map_err(ServiceError::db)?;

    let projects_total = projects::Entity::find().count(db).await.map_err(ServiceError::db)?;
    let projects_recent = projects::Entity::find()
        .filter(projects::Column::CompletionDate.gte(recent_cutoff(today)))
        .count(db)
        .await
        .map_err(ServiceError::db)?;

    let testimonials_total = testimonials::Entity::find().count(db).await.map_err(ServiceError::db)?;
    let distribution = rating_distribution(db).await?;

    let stats = DashboardStats::from_parts(
        services_total,
        services_active,
        projects_total,
        projects_recent,
        testimonials_total,
        distribution,
    );
    info!(
        services = stats.services.total,
        projects = stats.projects.total,
        testimonials = stats.testimonials.total,
        "dashboard stats computed"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_project, seed_service, seed_testimonial};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

    #[test]
    fn cutoff_uses_calendar_days() {
        assert_eq!(recent_cutoff(day(2024, 3, 1)), day(2024, 1, 31));
        assert_eq!(recent_cutoff(day(2025, 3, 1)), day(2025, 1, 30));
    }

    #[test]
    fn summarize_rounds_to_two_decimals() {
        let buckets = [RatingBucket { rating: 4, count: 2 }, RatingBucket { rating: 5, count: 1 }];
        assert_eq!(summarize_ratings(&buckets), (3, 4.33));
        assert_eq!(summarize_ratings(&[]), (0, 0.0));
    }

    #[test]
    fn exact_halves_round_to_even() {
        // 3 + 4*5 + 5*2 = 33 over 8 ratings = 4.125
        let buckets = [
            RatingBucket { rating: 3, count: 1 },
            RatingBucket { rating: 4, count: 5 },
            RatingBucket { rating: 5, count: 2 },
        ];
        assert_eq!(summarize_ratings(&buckets), (8, 4.12));
        // 4.375 rounds up to the even neighbour
        assert_eq!(mean_2dp_half_even(35, 8), 4.38);
        assert_eq!(mean_2dp_half_even(5, 1), 5.0);
        assert_eq!(mean_2dp_half_even(0, 0), 0.0);
    }

    #[test]
    fn serializes_with_dashboard_field_names() {
        let stats = DashboardStats::from_parts(2, 1, 2, 1, 2, vec![RatingBucket { rating: 5, count: 1 }]);
        let v = serde_json::to_value(&stats).unwrap();
        assert_eq!(v["services"]["inactive_services"], 1);
        assert_eq!(v["projects"]["recent_projects"], 1);
        assert_eq!(v["testimonials"]["pending_testimonials"], 1);
        assert_eq!(v["testimonials"]["average_rating"], 5.0);
        assert_eq!(v["rating_distribution"][0]["rating"], 5);
    }

    #[test]
    fn validate_catches_torn_snapshot() {
        let mut stats = DashboardStats::from_parts(1, 3, 0, 0, 0, vec![]);
        assert!(matches!(stats.validate(), Err(ServiceError::Validation(_))));

        stats = DashboardStats::from_parts(3, 1, 1, 1, 1, vec![RatingBucket { rating: 5, count: 1 }]);
        assert!(stats.validate().is_ok());

        stats.rating_distribution.push(RatingBucket { rating: 4, count: 1 });
        assert!(stats.validate().is_err());
    }

    #[tokio::test]
    async fn dashboard_stats_reference_scenario() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let today = day(2024, 6, 30);

        seed_service(&db, "Active", 0, true).await?;
        seed_service(&db, "Inactive", 1, false).await?;
        seed_project(&db, "Recent", "Rust", today - Duration::days(5)).await?;
        seed_project(&db, "Old", "Rust", today - Duration::days(60)).await?;
        seed_testimonial(&db, "Approved", 5, true).await?;
        seed_testimonial(&db, "Pending", 2, false).await?;

        let stats = compute_dashboard_stats(&db, today).await?;
        assert_eq!(stats.services, ServiceStats { total: 2, active: 1, inactive: 1 });
        assert_eq!(stats.projects, ProjectStats { total: 2, recent: 1 });
        assert_eq!(
            stats.testimonials,
            TestimonialStats { total: 2, approved: 1, pending: 1, average_rating: 5.0 }
        );
        assert_eq!(stats.rating_distribution, vec![RatingBucket { rating: 5, count: 1 }]);
        stats.validate()?;
        Ok(())
    }

    #[tokio::test]
    async fn window_boundary_is_inclusive() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let today = day(2024, 6, 30);
        seed_project(&db, "Edge", "Rust", recent_cutoff(today)).await?;
        seed_project(&db, "Outside", "Rust", recent_cutoff(today) - Duration::days(1)).await?;
        let stats = compute_dashboard_stats(&db, today).await?;
        assert_eq!(stats.projects.recent, 1);
        Ok(())
    }

    #[tokio::test]
    async fn empty_store_has_zero_average() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let stats = compute_dashboard_stats(&db, day(2024, 1, 1)).await?;
        assert_eq!(stats.testimonials.average_rating, 0.0);
        assert!(stats.rating_distribution.is_empty());
        stats.validate()?;
        Ok(())
    }

    #[tokio::test]
    async fn distribution_groups_and_sorts() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        for (r, approved) in [(5, true), (3, true), (5, true), (4, false), (1, true)] {
            seed_testimonial(&db, "x", r, approved).await?;
        }
        let dist = rating_distribution(&db).await?;
        assert_eq!(
            dist,
            vec![
                RatingBucket { rating: 1, count: 1 },
                RatingBucket { rating: 3, count: 1 },
                RatingBucket { rating: 5, count: 2 },
            ]
        );
        let stats = compute_dashboard_stats(&db, day(2024, 1, 1)).await?;
        assert_eq!(stats.testimonials.average_rating, 3.5);
        Ok(())
    }
}
