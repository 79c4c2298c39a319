//! Configuration errors

/// Error type for `TableConfig` loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("page size must be at least 1")]
    ZeroPageSize,

    #[error("visible page window must be at least 1")]
    ZeroPageWindow,

    #[error("fuzzy threshold must be within 0.0..=1.0, got {0}")]
    Threshold(f64),

    #[error("default price range is inverted: {min} > {max}")]
    PriceRange { min: f64, max: f64 },
}
