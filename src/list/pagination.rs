//! Client-side windowing over the list cache.
//!
//! The service always returns the whole collection; pages are contiguous,
//! order-preserving slices computed locally.

/// Records shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// `max(1, ceil(len / page_size))`. A zero page size is treated as one.
pub fn page_count(len: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    len.div_ceil(size).max(1)
}

/// Returns page `page` (1-indexed) of `items`, clamping out-of-range pages
/// into `[1, page_count]`. Never panics.
pub fn derive_page<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let size = page_size.max(1);
    let page = clamp_page(page, page_count(items.len(), size));
    let start = (page - 1).saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

/// Current page plus fixed page size. Navigation is a pure local update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self, len: usize) -> usize {
        page_count(len, self.page_size)
    }

    pub fn next(&mut self, len: usize) {
        self.go_to(self.current_page.saturating_add(1), len);
    }

    pub fn previous(&mut self, len: usize) {
        self.go_to(self.current_page.saturating_sub(1), len);
    }

    pub fn go_to(&mut self, page: usize, len: usize) {
        self.current_page = clamp_page(page, self.page_count(len));
    }

    /// Re-clamps after the underlying list changed size.
    pub fn clamp(&mut self, len: usize) {
        self.go_to(self.current_page, len);
    }

    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        derive_page(items, self.current_page, self.page_size)
    }

    pub fn is_first(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last(&self, len: usize) -> bool {
        self.current_page >= self.page_count(len)
    }
}
