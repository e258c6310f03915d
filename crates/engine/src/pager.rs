// Pagination controller - visible-slice math and page ownership.
//
// Ownership of the page index is declared at construction and fixed for
// the lifetime of the table instance. A component-owned pager mutates its
// own index; a caller-owned pager only validates navigation requests and
// echoes the page back for the caller to apply. Slicing is always
// client-side against the resident row array: the engine never asks the
// producer for another page, so the full result set must already be in
// memory.

use std::ops::Range;

use tabulon_protocol::TablePayload;

/// Default rows per page when neither caller nor payload specify one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Who owns the current page index for one table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOwner {
    /// The pager holds and mutates its own index (uncontrolled).
    Component,
    /// The caller holds the index; the pager never mutates it (controlled).
    Caller,
}

#[derive(Debug, Clone)]
pub struct Pager {
    page_size: usize,
    owner: PageOwner,
    current_page: usize,
    total_count: usize,
}

impl Pager {
    /// Component-owned pager. The internal page index starts at 1.
    pub fn new(page_size: usize, total_count: usize) -> Pager {
        Pager {
            page_size: page_size.max(1),
            owner: PageOwner::Component,
            current_page: 1,
            total_count,
        }
    }

    /// Caller-owned pager mirroring the caller's 1-based page index.
    pub fn controlled(page_size: usize, total_count: usize, current_page: usize) -> Pager {
        Pager {
            page_size: page_size.max(1),
            owner: PageOwner::Caller,
            current_page: current_page.max(1),
            total_count,
        }
    }

    /// Build a pager from payload hints. A producer-supplied `current_page`
    /// selects caller-owned mode; `total_count` defaults to the resident
    /// row array length.
    pub fn from_payload(payload: &TablePayload) -> Pager {
        let size = payload.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        let total = payload.effective_total();
        match payload.current_page {
            Some(page) => Pager::controlled(size, total, page),
            None => Pager::new(size, total),
        }
    }

    pub fn owner(&self) -> PageOwner {
        self.owner
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn total_pages(&self) -> usize {
        (self.total_count + self.page_size - 1) / self.page_size
    }

    /// Update the result-set size. A component-owned pager resets to page 1
    /// when the count changes, so it cannot point past the end of a shrunk
    /// set. Caller-owned pagers must reset through `sync_page` themselves.
    pub fn update_total(&mut self, total_count: usize) {
        if total_count != self.total_count {
            self.total_count = total_count;
            if self.owner == PageOwner::Component {
                self.current_page = 1;
            }
        }
    }

    /// Handle a navigation request. Out of `[1, total_pages]` the request
    /// is a silent no-op and returns None. Otherwise the validated page is
    /// returned; a component-owned pager also applies it, a caller-owned
    /// pager leaves its mirror untouched until the caller calls
    /// `sync_page`.
    pub fn request(&mut self, page: usize) -> Option<usize> {
        if page < 1 || page > self.total_pages() {
            return None;
        }
        if self.owner == PageOwner::Component {
            self.current_page = page;
        }
        Some(page)
    }

    pub fn next(&mut self) -> Option<usize> {
        self.request(self.current_page + 1)
    }

    pub fn prev(&mut self) -> Option<usize> {
        if self.current_page <= 1 {
            return None;
        }
        self.request(self.current_page - 1)
    }

    /// Mirror the caller's page index. No-op for component-owned pagers and
    /// for indices below 1.
    pub fn sync_page(&mut self, page: usize) {
        if self.owner == PageOwner::Caller && page >= 1 {
            self.current_page = page;
        }
    }

    /// Index range of the visible slice within the full row array. Empty
    /// when the current page lies outside `[1, total_pages]`.
    pub fn slice_bounds(&self) -> Range<usize> {
        if self.current_page < 1 || self.current_page > self.total_pages() {
            return 0..0;
        }
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total_count);
        start..end
    }

    /// The visible slice of `rows`, clamped to what is actually resident
    /// (a producer may claim a larger total than it sent).
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let bounds = self.slice_bounds();
        let start = bounds.start.min(rows.len());
        let end = bounds.end.min(rows.len());
        &rows[start..end]
    }

    /// Range caption, e.g. "1-5 of 12". Empty sets read "0 of 0".
    pub fn caption(&self) -> String {
        let bounds = self.slice_bounds();
        if bounds.is_empty() {
            return format!("0 of {}", self.total_count);
        }
        format!("{}-{} of {}", bounds.start + 1, bounds.end, self.total_count)
    }
}
