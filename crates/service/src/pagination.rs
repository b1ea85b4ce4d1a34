//! Page-number pagination for the public list endpoints.
//!
//! Inputs arrive as raw query strings and are parsed leniently: anything that is not a
//! positive integer falls back to the default instead of failing the request.

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Upper bound for a caller-supplied `page_size`.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub per_page: u64,
}

impl Pagination {
    /// Build from raw `page` / `page_size` query values.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page = page.and_then(parse_positive).unwrap_or(1);
        let per_page = page_size.and_then(parse_positive).unwrap_or(DEFAULT_PAGE_SIZE);
        Self { page, per_page }
    }

    /// Clamp to sane bounds and return `(zero_based_page_index, per_page)`.
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, MAX_PAGE_SIZE);
        (page - 1, per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: DEFAULT_PAGE_SIZE } }
}

fn parse_positive(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|v| *v > 0)
}

/// One page of results plus what is needed to link its neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total rows matching the query, across all pages.
    pub count: u64,
    /// 1-based index of this page.
    pub page: u64,
    pub per_page: u64,
}

impl<T> Page<T> {
    /// Total number of pages; an empty result still has one (empty) page.
    pub fn num_pages(&self) -> u64 {
        if self.count == 0 { 1 } else { self.count.div_ceil(self.per_page) }
    }

    pub fn next_page(&self) -> Option<u64> {
        (self.page < self.num_pages()).then(|| self.page + 1)
    }

    /// Past the end this points back at the last real page.
    pub fn previous_page(&self) -> Option<u64> {
        (self.page > 1).then(|| (self.page - 1).min(self.num_pages()))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(count: u64, page: u64, per_page: u64) -> Page<()> {
        Page { items: vec![], count, page, per_page }
    }

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 4);
        assert_eq!(per, MAX_PAGE_SIZE);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.per_page, 10);
    }

    #[test]
    fn from_query_ignores_garbage() {
        assert_eq!(Pagination::from_query(Some("abc"), Some("-3")), Pagination::default());
        assert_eq!(Pagination::from_query(Some("0"), Some("0")), Pagination::default());
        assert_eq!(Pagination::from_query(Some(" 3 "), Some("25")), Pagination { page: 3, per_page: 25 });
        assert_eq!(Pagination::from_query(None, Some("500")).normalize(), (0, 100));
    }

    #[test]
    fn neighbours_in_the_middle() {
        let p = page(150, 1, 100);
        assert_eq!(p.num_pages(), 2);
        assert_eq!(p.next_page(), Some(2));
        assert_eq!(p.previous_page(), None);

        let p = page(150, 2, 100);
        assert_eq!(p.next_page(), None);
        assert_eq!(p.previous_page(), Some(1));
    }

    #[test]
    fn out_of_range_page_links_back_to_last() {
        let p = page(25, 9, 10);
        assert_eq!(p.num_pages(), 3);
        assert_eq!(p.next_page(), None);
        assert_eq!(p.previous_page(), Some(3));
    }

    #[test]
    fn empty_result_has_one_page() {
        let p = page(0, 1, 10);
        assert_eq!(p.num_pages(), 1);
        assert_eq!(p.next_page(), None);
        assert_eq!(p.previous_page(), None);
    }
}
