//! FieldError for column descriptors and record accessors

/// Error type for field lookups on `Record`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// The requested field does not exist on a record.
    #[error("Field '{field}' not found in record")]
    Missing { field: String },

    /// The field exists but holds a different kind of value than requested.
    #[error("Field '{field}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Two column descriptors share the same id.
    #[error("Column '{column}' is defined more than once")]
    DuplicateColumn { column: String },

    /// A column id is referenced that is not part of the column set.
    #[error("Column '{column}' is not defined")]
    UnknownColumn { column: String },

    #[error("Column '{column}' cannot be grouped")]
    NotGroupable { column: String },
}

impl FieldError {
    /// Creates a new missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(field: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Creates a new duplicate column error.
    pub fn duplicate_column(column: impl Into<String>) -> Self {
        Self::DuplicateColumn {
            column: column.into(),
        }
    }

    /// Creates a new unknown column error.
    pub fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
        }
    }
}
