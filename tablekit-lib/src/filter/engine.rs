//! The filter pipeline

use crate::fuzzy::FuzzyIndex;
use crate::model::{Dataset, Record};

use super::FilterSelection;

/// Applies a [`FilterSelection`] to a dataset.
///
/// Stages run in a fixed order, each narrowing the previous result:
/// fuzzy name search, category, subcategory, price, created-at. Only top-level
/// records are tested; sub-rows travel with their parent. The output keeps the
/// order of the stage that produced it (fuzzy rank when a name query is
/// present, dataset order otherwise).
#[derive(Debug, Clone)]
pub struct FilterEngine {
    index: FuzzyIndex,
}

impl FilterEngine {
    /// Builds an engine with the default fuzzy threshold.
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            index: FuzzyIndex::new(dataset),
        }
    }

    pub fn with_index(index: FuzzyIndex) -> Self {
        Self { index }
    }

    pub fn dataset(&self) -> &Dataset {
        self.index.dataset()
    }

    pub fn index(&self) -> &FuzzyIndex {
        &self.index
    }

    /// Returns the records passing every active predicate. Pure: the same
    /// selection always yields the same sequence.
    pub fn apply(&self, selection: &FilterSelection) -> Vec<&Record> {
        let records = self.dataset().records();
        self.apply_indices(selection)
            .into_iter()
            .map(|index| &records[index])
            .collect()
    }

    /// Like [`apply`](Self::apply), but yields positions in the dataset.
    pub fn apply_indices(&self, selection: &FilterSelection) -> Vec<usize> {
        if let Err(e) = selection.validate() {
            log::warn!("Filter matches nothing: {}", e);
            return Vec::new();
        }

        let records = self.dataset().records();
        let mut result: Vec<usize> = if selection.name.trim().is_empty() {
            (0..records.len()).collect()
        } else {
            self.index
                .matches(&selection.name)
                .into_iter()
                .map(|m| m.index)
                .collect()
        };

        if !selection.category.is_empty() {
            result.retain(|&i| selection.category.contains(&records[i].category));
        }
        if !selection.subcategory.is_empty() {
            result.retain(|&i| selection.subcategory.contains(&records[i].subcategory));
        }

        result.retain(|&i| selection.price.contains(records[i].price));

        if selection.created_at.is_active() {
            result.retain(|&i| selection.created_at.contains(records[i].created_at));
        }

        log::debug!("Filtered {} of {} records", result.len(), records.len());
        result
    }
}
