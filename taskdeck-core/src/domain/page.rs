//! Pagination contract: sort/page request and paged result

use serde::{Deserialize, Serialize};

/// Sort direction for paged queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse from a query string value; anything other than "desc"
    /// (case-insensitive) means ascending.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Externally supplied sort and pagination parameters.
///
/// Normalization matches the request contract: non-positive limits
/// fall back to 10, negative offsets to 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortPagination {
    pub limit: usize,
    pub offset: usize,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
}

impl SortPagination {
    pub fn new(limit: i64, offset: i64, sort_by: Option<&str>, sort_order: &str) -> Self {
        Self {
            limit: if limit > 0 { limit as usize } else { 10 },
            offset: if offset >= 0 { offset as usize } else { 0 },
            sort_by: sort_by
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            sort_order: SortOrder::parse(sort_order),
        }
    }

    /// Derived 1-based page number
    pub fn page(&self) -> usize {
        self.offset / self.limit + 1
    }
}

impl Default for SortPagination {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            sort_by: None,
            sort_order: SortOrder::Asc,
        }
    }
}

/// A bounded slice of a filtered, sorted collection plus total-count
/// metadata for client-side pagination controls.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub current_page: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: usize, current_page: usize, page_size: usize) -> Self {
        Self {
            items,
            total_count,
            current_page,
            page_size,
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Map items while keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            current_page: self.current_page,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_pagination_normalization() {
        let sp = SortPagination::new(0, -5, Some("  "), "DESC");
        assert_eq!(sp.limit, 10);
        assert_eq!(sp.offset, 0);
        assert_eq!(sp.sort_by, None);
        assert_eq!(sp.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_page_number_derivation() {
        assert_eq!(SortPagination::new(10, 0, None, "asc").page(), 1);
        assert_eq!(SortPagination::new(10, 10, None, "asc").page(), 2);
        assert_eq!(SortPagination::new(10, 25, None, "asc").page(), 3);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Page<i32> = Page::new(vec![], 21, 1, 10);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page: Page<i32> = Page::new(vec![1], 21, 3, 10);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }
}
