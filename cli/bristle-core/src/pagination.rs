//! Client-side pagination over a full result set.
//!
//! The catalog service returns every matching product in one response;
//! pages are derived locally and are never part of request composition.

/// Number of products shown per page.
pub const PAGE_SIZE: usize = 15;

/// Pure page math over a result list of `total` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl PageView {
    pub fn new(total: usize, page: usize) -> Self {
        Self {
            page,
            page_size: PAGE_SIZE,
            total,
        }
    }

    /// Total number of pages; zero when there are no results.
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    /// Whether `target` is a page that can be navigated to.
    pub fn contains(&self, target: usize) -> bool {
        target >= 1 && target <= self.total_pages()
    }

    /// Bounds of the visible slice as `[start, end)`, clamped to the
    /// result list.
    pub fn slice_bounds(&self) -> (usize, usize) {
        let start = self.page.saturating_sub(1) * self.page_size;
        let start = start.min(self.total);
        let end = (start + self.page_size).min(self.total);
        (start, end)
    }

    /// Borrow the visible page of `results`.
    pub fn slice<'a, T>(&self, results: &'a [T]) -> &'a [T] {
        let (start, end) = self.slice_bounds();
        &results[start..end]
    }
}
