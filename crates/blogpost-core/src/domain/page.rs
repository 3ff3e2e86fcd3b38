use serde::{Deserialize, Serialize};

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Both values are clamped to at least 1, and `page` is capped so the
    /// row offset of the page always fits in a `u64`.
    pub fn new(page: u64, per_page: u64) -> Self {
        let per_page = per_page.max(1);
        Self {
            page: page.clamp(1, u64::MAX / per_page),
            per_page,
        }
    }

    /// Zero-based page index.
    pub fn index(&self) -> u64 {
        self.page - 1
    }

    /// Number of rows before the first row of this page.
    pub fn offset(&self) -> u64 {
        self.index().saturating_mul(self.per_page)
    }
}

/// One page of results plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page,
            per_page: request.per_page,
            total_items,
            total_pages: total_items.div_ceil(request.per_page),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_clamped() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request.page, 1);
        assert_eq!(request.per_page, 1);
        assert_eq!(request.index(), 0);
    }

    #[test]
    fn test_huge_page_is_capped() {
        let request = PageRequest::new(u64::MAX, 3);
        assert_eq!(request.page, u64::MAX / 3);
        assert_eq!(request.offset(), (u64::MAX / 3 - 1) * 3);

        let request = PageRequest::new(i64::MAX as u64, 1);
        assert_eq!(request.page, i64::MAX as u64);
        assert_eq!(request.offset(), i64::MAX as u64 - 1);
    }

    #[test]
    fn test_navigation() {
        let first = Paginated::new(vec![1, 2, 3], PageRequest::new(1, 3), 7);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next());
        assert!(!first.has_prev());

        let last = Paginated::new(vec![7], PageRequest::new(3, 3), 7);
        assert!(!last.has_next());
        assert!(last.has_prev());
    }

    #[test]
    fn test_empty() {
        let page: Paginated<u8> = Paginated::new(vec![], PageRequest::new(1, 3), 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
    }

    #[test]
    fn test_map_keeps_totals() {
        let page = Paginated::new(vec![1, 2], PageRequest::new(2, 2), 4).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total_items, 4);
        assert_eq!(page.page, 2);
    }
}
