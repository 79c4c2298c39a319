//! Dataset loading errors

/// Error type for dataset loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Two records under the same parent share an id.
    #[error("duplicate record id '{id}' under '{parent}'")]
    DuplicateId { id: String, parent: String },

    #[error("record '{id}' has a negative price: {price}")]
    NegativePrice { id: String, price: f64 },
}
