//! One page of a paginated result

/// A page of results plus the totals of the whole result
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items on this page, at most `page_size`
    pub items: Vec<T>,

    /// Number of matches across all pages
    pub total_count: usize,

    /// Number of non-empty pages (0 when nothing matched)
    pub total_pages: usize,

    /// 1-indexed page number that was requested
    pub page: usize,

    /// Page size that was requested
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Slice a complete, already ordered result into the requested page
    ///
    /// `page` and `page_size` must both be at least 1.
    pub(crate) fn slice(all: Vec<T>, page: usize, page_size: usize) -> Self {
        let total_count = all.len();
        let total_pages = total_count.div_ceil(page_size);
        let start = (page - 1).saturating_mul(page_size);

        let items = all.into_iter().skip(start).take(page_size).collect();

        Self {
            items,
            total_count,
            total_pages,
            page,
            page_size,
        }
    }

    /// Check whether this page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check whether a later page has items
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Check whether an earlier page exists
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_middle_page() {
        let page = Page::slice((1..=7).collect::<Vec<_>>(), 2, 3);
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total_count, 7);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn test_slice_past_end_is_empty() {
        let page = Page::slice((1..=7).collect::<Vec<_>>(), 9, 3);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next());
    }

    #[test]
    fn test_slice_nothing() {
        let page: Page<u32> = Page::slice(Vec::new(), 1, 20);
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_prev());
    }
}
