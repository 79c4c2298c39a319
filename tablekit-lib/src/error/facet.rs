//! Facet computation errors

use super::FieldError;

/// Error type for facet and bounds computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FacetError {
    /// Bounds are undefined over an empty dataset. Render a disabled control instead.
    #[error("cannot compute bounds of '{field}' over an empty dataset")]
    EmptyDataset { field: String },

    #[error(transparent)]
    Field(#[from] FieldError),
}

impl FacetError {
    /// Creates a new empty dataset error.
    pub fn empty_dataset(field: impl Into<String>) -> Self {
        Self::EmptyDataset {
            field: field.into(),
        }
    }
}
