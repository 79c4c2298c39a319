//! Table model: the grid engine seam.
//!
//! [`TableModel`] is what the session drives: it receives the filtered records
//! and owns sort, grouping, expansion, pagination and column visibility.
//! [`GridModel`] is the in-crate implementation.

mod column;
mod grid;
mod row;
mod sort;

use std::ops::Range;

pub use column::*;
pub use grid::*;
pub use row::*;
pub use sort::*;

use crate::error::FieldError;
use crate::expansion::ExpansionState;
use crate::model::{Dataset, Record};

// =============================================================================
// Headers
// =============================================================================

/// A header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub column: String,
    pub label: String,
    /// `Some(descending)` when the column is part of the sort.
    pub sort: Option<bool>,
    pub grouped: bool,
}

/// One row of header cells. Flat column sets produce a single group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderGroup {
    pub id: String,
    pub depth: usize,
    pub headers: Vec<Header>,
}

// =============================================================================
// Row model
// =============================================================================

/// The sorted, grouped rows plus the slice of top-level rows on the current page.
#[derive(Debug, Clone)]
pub struct RowModel<'a> {
    pub tree: RowTree<'a>,
    /// Range into `tree.roots()` for the current page.
    pub page: Range<usize>,
}

impl<'a> RowModel<'a> {
    /// Top-level rows on the current page. Expanded sub-rows are not counted
    /// against the page size; they render under their parent.
    pub fn page_roots(&self) -> &[usize] {
        let roots = self.tree.roots();
        let end = self.page.end.min(roots.len());
        let start = self.page.start.min(end);
        &roots[start..end]
    }
}

// =============================================================================
// TableModel trait
// =============================================================================

/// Grid engine interface.
///
/// Implementations recompute the row model from the records they were last
/// given; the caller never patches rows incrementally.
pub trait TableModel {
    /// Replace the rows with the top-level records of `dataset` at `rows`, in
    /// that order, and return to the first page. The dataset is shared, not
    /// copied.
    fn set_data(&mut self, dataset: Dataset, rows: Vec<usize>);

    /// Records as last given, before the global filter.
    fn data(&self) -> Vec<&Record>;

    fn columns(&self) -> &ColumnSet;

    fn header_groups(&self) -> Vec<HeaderGroup>;

    fn row_model(&self) -> RowModel<'_>;

    // -------------------------------------------------------------------------
    // Sorting, grouping, global filter
    // -------------------------------------------------------------------------

    fn sort_spec(&self) -> &SortSpec;

    /// Advance a sortable column through ascending, descending, unsorted.
    fn cycle_sort(&mut self, column: &str) -> Result<(), FieldError>;

    fn grouping(&self) -> &[String];

    fn set_grouping(&mut self, columns: Vec<String>) -> Result<(), FieldError>;

    fn global_filter(&self) -> &str;

    fn set_global_filter(&mut self, query: &str);

    // -------------------------------------------------------------------------
    // Expansion
    // -------------------------------------------------------------------------

    fn expansion(&self) -> &ExpansionState;

    fn expansion_mut(&mut self) -> &mut ExpansionState;

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    fn page_size(&self) -> usize;

    fn page_count(&self) -> usize;

    /// Zero-indexed.
    fn current_page_index(&self) -> usize;

    /// Clamped to the valid page range.
    fn set_page_index(&mut self, index: usize);

    fn previous_page(&mut self);

    fn next_page(&mut self);

    fn can_previous_page(&self) -> bool;

    fn can_next_page(&self) -> bool;

    // -------------------------------------------------------------------------
    // Column visibility
    // -------------------------------------------------------------------------

    fn is_column_visible(&self, column: &str) -> bool;

    /// Returns the new visibility.
    fn toggle_column_visibility(&mut self, column: &str) -> Result<bool, FieldError>;
}
