use serde::{Deserialize, Serialize};

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

/// Collection-GET query parameters, with the documented defaults
/// (page=1, limit=10). Pages are 1-indexed.
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            search: None,
            status: None,
        }
    }
}

impl ListQuery {
    /// Page/limit with nonsense values (0, negatives) clamped away
    pub fn normalized(&self) -> (i64, i64) {
        (self.page.max(1), self.limit.max(1))
    }

    pub fn offset(&self) -> i64 {
        let (page, limit) = self.normalized();
        (page - 1) * limit
    }
}

/// Pagination envelope returned alongside every listing
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: (total + limit - 1) / limit,
        }
    }
}

/// One page of rows plus the pagination envelope
#[derive(Debug)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_page_one_limit_ten() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert!(query.search.is_none());
        assert!(query.status.is_none());
    }

    #[test]
    fn offset_is_zero_indexed_from_one_indexed_pages() {
        let query = ListQuery {
            page: 2,
            limit: 10,
            ..Default::default()
        };
        assert_eq!(query.offset(), 10);
    }

    #[test]
    fn zero_page_is_clamped() {
        let query = ListQuery {
            page: 0,
            limit: 10,
            ..Default::default()
        };
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Pagination::new(2, 10, 15).total_pages, 2);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
    }
}
