//! One page of query results

use serde::Serialize;

/// A slice of matching records plus the total match count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matches across all pages
    pub total: usize,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Cut page `page` out of `all` (1-based, already normalized)
    pub fn slice(all: Vec<T>, page: usize, page_size: usize) -> Self {
        let total = all.len();
        let start = page.saturating_sub(1).saturating_mul(page_size).min(total);
        let end = start.saturating_add(page_size).min(total);

        let items = all.into_iter().skip(start).take(end - start).collect();

        Self {
            items,
            total,
            page,
            page_size,
        }
    }

    /// Number of pages needed for `total` records
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_bounds() {
        let page = Page::slice((1..=5).collect::<Vec<_>>(), 3, 2);
        assert_eq!(page.items, vec![5]);
        assert_eq!(page.total, 5);
        assert_eq!(page.page_count(), 3);
        assert!(!page.has_next());

        let page = Page::slice((1..=5).collect::<Vec<_>>(), 10, 2);
        assert!(page.is_empty());
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let page = Page::slice(vec![1, 2, 3], usize::MAX, usize::MAX);
        assert!(page.is_empty());
        assert_eq!(page.total, 3);
    }
}
