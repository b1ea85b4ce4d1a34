//! Wire representations of stored records, including the derived read-only fields.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;
use url::Url;
use utoipa::ToSchema;

use models::{projects, services, testimonials};
use service::pagination::Page;

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceOut {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub display_order: i32,
}

impl From<services::Model> for ServiceOut {
    fn from(m: services::Model) -> Self {
        Self { id: m.id, title: m.title, description: m.description, icon: m.icon, display_order: m.display_order }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectOut {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub technologies: String,
    pub technologies_list: Vec<String>,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub completion_date: NaiveDate,
}

impl ProjectOut {
    /// `origin` and `media_prefix` turn the stored relative image path into an absolute URL.
    pub fn from_model(m: projects::Model, origin: &Url, media_prefix: &str) -> Self {
        let technologies_list = m.technologies_list();
        let image_url = crate::links::media_url(origin, media_prefix, m.image.as_deref());
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            image_url,
            technologies: m.technologies,
            technologies_list,
            demo_url: m.demo_url,
            github_url: m.github_url,
            completion_date: m.completion_date,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TestimonialOut {
    pub id: i32,
    pub author: String,
    pub position: String,
    pub company: String,
    pub content: String,
    pub rating: i32,
    pub rating_stars: String,
    pub created_at: DateTime<FixedOffset>,
}

impl From<testimonials::Model> for TestimonialOut {
    fn from(m: testimonials::Model) -> Self {
        let rating_stars = m.rating_stars();
        Self {
            id: m.id,
            author: m.author,
            position: m.position,
            company: m.company,
            content: m.content,
            rating: m.rating,
            rating_stars,
            created_at: m.created_at,
        }
    }
}

/// `{count, next, previous, results}` envelope for paginated lists.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(page: Page<T>, next: Option<String>, previous: Option<String>) -> Self {
        Self { count: page.count, next, previous, results: page.items }
    }
}
