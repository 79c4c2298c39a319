//! Per-row expand/collapse state.

use std::collections::HashSet;

use crate::table::{RowId, RowTree};

/// Set of expanded row ids. Rows not in the set are collapsed.
///
/// Kept apart from the row data: expanding a row never changes the dataset
/// or any other row's state, and collapsing a parent leaves its descendants'
/// flags in place for when it is reopened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<RowId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &RowId) -> bool {
        self.expanded.contains(id)
    }

    /// Returns true if the row was collapsed before.
    pub fn expand(&mut self, id: &RowId) -> bool {
        self.expanded.insert(id.clone())
    }

    /// Returns true if the row was expanded before.
    pub fn collapse(&mut self, id: &RowId) -> bool {
        self.expanded.remove(id)
    }

    /// Flips one row and returns its new state.
    pub fn toggle(&mut self, id: &RowId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    /// Expands every row of `tree` that has children.
    pub fn expand_all(&mut self, tree: &RowTree<'_>) {
        self.expanded.extend(tree.expandable_ids().cloned());
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Number of rows flagged expanded.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}
