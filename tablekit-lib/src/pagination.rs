//! Page navigation and the page-number window.

use std::ops::Range;

/// Default width of the page-number window.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Page numbers (1-indexed) to show as buttons.
///
/// Shows every page when they fit. Otherwise slides a `max_visible` window
/// centred on `current_page`, clamped so it never runs past either end.
/// `current_page` must already be within `1..=total_pages`; this function does
/// not clamp it.
///
/// ```
/// use tablekit_lib::pagination::visible_page_numbers;
///
/// assert_eq!(visible_page_numbers(10, 9, 5), vec![6, 7, 8, 9, 10]);
/// ```
pub fn visible_page_numbers(total_pages: usize, current_page: usize, max_visible: usize) -> Vec<usize> {
    if total_pages <= max_visible {
        return (1..=total_pages).collect();
    }

    let half = max_visible / 2;
    let start = if current_page <= half + 1 {
        1
    } else if current_page >= total_pages - half {
        total_pages - max_visible + 1
    } else {
        current_page - half
    };

    (start..start + max_visible).collect()
}

/// The page-number strip under the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-indexed page numbers to show.
    pub pages: Vec<usize>,
    /// 1-indexed current page (0 when there are no pages).
    pub current: usize,
    /// Whether more pages exist than the window shows.
    pub show_ellipsis: bool,
}

impl PageWindow {
    pub fn new(total_pages: usize, current_page: usize, max_visible: usize) -> Self {
        Self {
            pages: visible_page_numbers(total_pages, current_page, max_visible),
            current: current_page,
            show_ellipsis: total_pages > max_visible,
        }
    }
}

/// Zero-indexed page cursor over a list of top-level rows.
///
/// Navigation clamps to the valid page range, so the index handed to
/// [`visible_page_numbers`] is always in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_index: usize,
    page_size: usize,
    row_count: usize,
}

impl Pager {
    /// A pager at the first page. A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
            row_count: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// `ceil(rows / page_size)`; zero rows means zero pages.
    pub fn page_count(&self) -> usize {
        self.row_count.div_ceil(self.page_size)
    }

    /// Updates the row count, pulling the cursor back if the last page vanished.
    pub fn set_row_count(&mut self, row_count: usize) {
        self.row_count = row_count;
        self.page_index = self.clamp(self.page_index);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = self.clamp(self.page_index);
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.page_index = self.clamp(index);
    }

    pub fn reset(&mut self) {
        self.page_index = 0;
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    pub fn previous_page(&mut self) {
        if self.can_previous_page() {
            self.page_index -= 1;
        }
    }

    pub fn next_page(&mut self) {
        if self.can_next_page() {
            self.page_index += 1;
        }
    }

    /// Row indices of the current page.
    pub fn page_range(&self) -> Range<usize> {
        let start = (self.page_index * self.page_size).min(self.row_count);
        let end = (start + self.page_size).min(self.row_count);
        start..end
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.page_count().saturating_sub(1))
    }
}
