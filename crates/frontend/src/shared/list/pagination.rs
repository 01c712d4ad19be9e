//! Page bookkeeping and the compressed page-number strip shown under every list.
//!
//! Pages are 1-based throughout.

use serde::{Deserialize, Serialize};

/// Default number of neighbours shown on each side of the current page.
pub const DEFAULT_WINDOW_DELTA: usize = 2;

/// Up to this many pages are listed without ellipses.
const FULL_STRIP_MAX_PAGES: usize = 7;

/// One entry of the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageToken {
    Page(usize),
    Ellipsis,
}

impl PageToken {
    pub fn page(self) -> Option<usize> {
        match self {
            PageToken::Page(page) => Some(page),
            PageToken::Ellipsis => None,
        }
    }
}

/// Page numbers to render for `current_page` out of `total_pages`.
///
/// Short ranges are listed in full. Longer ones always show the first and last
/// page, the pages within `delta` of the current one, and an ellipsis for each
/// gap. `current_page` is clamped into range first.
pub fn window(current_page: usize, total_pages: usize, delta: usize) -> Vec<PageToken> {
    if total_pages <= FULL_STRIP_MAX_PAGES {
        return (1..=total_pages).map(PageToken::Page).collect();
    }

    let current = current_page.clamp(1, total_pages);
    let mut tokens = Vec::with_capacity(2 * delta + 5);

    tokens.push(PageToken::Page(1));
    if current > delta + 2 {
        tokens.push(PageToken::Ellipsis);
    }

    let start = current.saturating_sub(delta).max(2);
    let end = (current + delta).min(total_pages - 1);
    tokens.extend((start..=end).map(PageToken::Page));

    if current + delta < total_pages - 1 {
        tokens.push(PageToken::Ellipsis);
    }
    tokens.push(PageToken::Page(total_pages));

    tokens
}

/// Rows of 1-based `page`. Out-of-range pages give an empty slice.
pub fn slice<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size).min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

pub fn total_pages(total_records: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_records.div_ceil(page_size)
}

/// Current position in a paginated list.
///
/// Invariant: `1 <= current_page <= max(total_pages, 1)`; every mutator re-clamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    current_page: usize,
    page_size: usize,
    total_records: usize,
    /// Set when the server reports its own page count.
    server_total_pages: Option<usize>,
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_records: 0,
            server_total_pages: None,
        }
    }

    /// State for a page already cut by the server.
    pub fn from_server(page: usize, page_size: usize, total_records: usize, total_pages: usize) -> Self {
        let mut state = Self {
            current_page: page,
            page_size: page_size.max(1),
            total_records,
            server_total_pages: Some(total_pages),
        };
        state.clamp();
        state
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_records(&self) -> usize {
        self.total_records
    }

    pub fn total_pages(&self) -> usize {
        self.server_total_pages
            .unwrap_or_else(|| total_pages(self.total_records, self.page_size))
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Record count changed (reload or new filter). Keeps the page if it still exists.
    pub fn set_total_records(&mut self, total_records: usize) {
        self.total_records = total_records;
        self.server_total_pages = None;
        self.clamp();
    }

    pub fn go_to(&mut self, page: usize) {
        self.current_page = page;
        self.clamp();
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// New page size; jumps back to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.server_total_pages = None;
        self.current_page = 1;
    }

    pub fn window(&self, delta: usize) -> Vec<PageToken> {
        window(self.current_page, self.total_pages(), delta)
    }

    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        slice(rows, self.current_page, self.page_size)
    }

    /// "21–40 of 95" style label; "0 of 0" for an empty list.
    pub fn range_label(&self) -> String {
        if self.total_records == 0 {
            return "0 of 0".to_string();
        }
        let first = (self.current_page - 1) * self.page_size + 1;
        let last = (self.current_page * self.page_size).min(self.total_records);
        format!("{}–{} of {}", first, last, self.total_records)
    }

    fn clamp(&mut self) {
        self.current_page = self.current_page.clamp(1, self.total_pages().max(1));
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(100)
    }
}
