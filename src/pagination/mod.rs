//! Page-window state for a sorted record set.

use crate::catalog::{sort_by_popularity, Ranked};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_MAX_BUTTONS: usize = 3;

/// Number of pages needed for `item_count` records.
pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    item_count.div_ceil(page_size.max(1))
}

/// Start/end indices of a one-based page, clipped to `total_items`.
pub fn page_window(total_items: usize, page_size: usize, page: usize) -> (usize, usize) {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(total_items);
    (start.min(total_items), end)
}

/// Page numbers to offer as buttons.
///
/// Returns every page when they all fit, otherwise a run of `max_buttons`
/// pages with `current_page` as close to the middle as the ends allow.
pub fn page_buttons(current_page: usize, total_pages: usize, max_buttons: usize) -> Vec<usize> {
    if max_buttons == 0 || total_pages == 0 {
        return Vec::new();
    }
    if total_pages <= max_buttons {
        return (1..=total_pages).collect();
    }
    let current_page = current_page.clamp(1, total_pages);
    let start = current_page
        .saturating_sub(max_buttons / 2)
        .max(1)
        .min(total_pages - max_buttons + 1);
    (start..start + max_buttons).collect()
}

/// Owns the sorted records and the current page.
#[derive(Clone, Debug)]
pub struct Paginator<T> {
    records: Vec<T>,
    current_page: usize,
    page_size: usize,
}

impl<T> Default for Paginator<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T> Paginator<T> {
    /// A zero page size is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.records.len(), self.page_size)
    }

    /// Zero-based index of the first visible record.
    pub fn first_index(&self) -> usize {
        page_window(self.records.len(), self.page_size, self.current_page).0
    }

    pub fn visible_slice(&self) -> &[T] {
        let (start, end) = page_window(self.records.len(), self.page_size, self.current_page);
        &self.records[start..end]
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Returns whether the page changed.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub fn visible_page_buttons(&self, max_buttons: usize) -> Vec<usize> {
        page_buttons(self.current_page, self.total_pages(), max_buttons)
    }
}

impl<T: Ranked> Paginator<T> {
    /// Replaces the records, ordered by descending popularity, and returns
    /// to the first page.
    pub fn set_records(&mut self, mut records: Vec<T>) {
        sort_by_popularity(&mut records);
        self.records = records;
        self.current_page = 1;
    }
}
