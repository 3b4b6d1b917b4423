//! Fixed-size paging over the filtered list.

/// Rows shown per page.
pub const PAGE_SIZE: usize = 5;

/// The current page (1-based) and page size.
///
/// The paginator does not watch the list it pages: when the list shrinks the
/// current page can end up past the last one and [`Paginator::page`] returns
/// an empty slice until the user moves back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Paginator {
    /// A page size of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    /// Number of pages for `len` items; never less than one.
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Items `[(page - 1) * size, page * size)` of `items`.
    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current - 1).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    pub fn is_out_of_range(&self, len: usize) -> bool {
        self.current > self.page_count(len)
    }

    pub fn prev(&mut self) {
        self.current = self.current.saturating_sub(1).max(1);
    }

    pub fn next(&mut self, len: usize) {
        self.current = (self.current + 1).min(self.page_count(len));
    }
}
