//! fixed-size pagination for dashboard listings.

use serde::{Deserialize, Serialize};

/// items per page.
pub const PAGE_SIZE: usize = 10;

/// one page of a listing.
///
/// page numbers are 1-based. asking for a page past the end yields the last
/// page, and page 0 yields the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    /// cut `requested` out of the full list of items.
    pub fn paginate(all: Vec<T>, requested: usize) -> Self {
        let total_items = all.len();
        let total_pages = total_items.div_ceil(PAGE_SIZE).max(1);
        let page = requested.clamp(1, total_pages);

        let items = all
            .into_iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect();

        Self {
            items,
            page,
            total_pages,
            total_items,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// convert the items, keeping the page position.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total_items: self.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_list_has_one_page() {
        let page: Page<u32> = Page::paginate(vec![], 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn test_out_of_range_clamps_to_last() {
        let page = Page::paginate((0..25).collect::<Vec<_>>(), 99);
        assert_eq!(page.page, 3);
        assert_eq!(page.items, vec![20, 21, 22, 23, 24]);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_zero_is_first() {
        let page = Page::paginate((0..25).collect::<Vec<_>>(), 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), PAGE_SIZE);
        assert_eq!(page.items[0], 0);
    }

    proptest! {
        #[test]
        fn page_never_exceeds_page_size(len in 0usize..100, requested in 0usize..20) {
            let page = Page::paginate((0..len).collect::<Vec<_>>(), requested);
            prop_assert!(page.items.len() <= PAGE_SIZE);
            prop_assert!(page.page >= 1 && page.page <= page.total_pages);
            prop_assert_eq!(page.total_items, len);
        }
    }
}
