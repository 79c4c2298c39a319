//! Range errors reported by filter selections

use chrono::{DateTime, Utc};

/// An inverted range in a filter selection.
///
/// The filter engine never returns this; it treats an inverted range as
/// "match nothing". `FilterSelection::validate` surfaces it so a UI can hint
/// at the problem while a slider is being dragged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RangeError {
    #[error("price range is inverted: {min} > {max}")]
    Price { min: f64, max: f64 },

    #[error("date range is inverted: {from} > {to}")]
    Date {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
}
