//! Repository-style read queries, one function per public or admin listing.

pub mod services;
pub mod projects;
pub mod testimonials;

use sea_orm::{
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Select,
};

use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

/// Case-insensitive substring match on a text column.
/// `%`, `_` and `\` in the needle match literally.
pub(crate) fn contains_ci<C: ColumnTrait>(col: C, needle: &str) -> SimpleExpr {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape('\\'))
}

/// Run `select` as one page: total count first, then the requested slice.
pub(crate) async fn fetch_page<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    opts: Pagination,
) -> Result<Page<E::Model>, ServiceError>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
{
    let (page_idx, per_page) = opts.normalize();
    let paginator = select.paginate(db, per_page);
    let count = paginator.num_items().await.map_err(ServiceError::db)?;
    let items = paginator.fetch_page(page_idx).await.map_err(ServiceError::db)?;
    Ok(Page { items, count, page: page_idx + 1, per_page })
}
