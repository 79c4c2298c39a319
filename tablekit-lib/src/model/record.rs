//! Inventory record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single row of the dataset.
///
/// Records form a forest: `sub_rows` holds children of the same shape, nested
/// to any depth. Timestamps are (de)serialized as RFC 3339 strings and field
/// names use camelCase on the wire.
///
/// # Example
///
/// ```
/// use tablekit_lib::model::Record;
///
/// let record = Record::new("1", "Laptop")
///     .with_category("Electronics")
///     .with_price(999.0)
///     .with_child(Record::new("1a", "Charger").with_price(49.0));
///
/// assert!(record.has_children());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_rows: Vec<Record>,
}

impl Record {
    /// Creates a record with empty categories, zero price and epoch timestamps.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            subcategory: String::new(),
            price: 0.0,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
            sub_rows: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = subcategory.into();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Sets `created_at`, and `updated_at` too if it still predates it.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        if self.updated_at < created_at {
            self.updated_at = created_at;
        }
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// Appends a child record.
    pub fn with_child(mut self, child: Record) -> Self {
        self.sub_rows.push(child);
        self
    }

    /// Whether this record has at least one sub-row.
    pub fn has_children(&self) -> bool {
        !self.sub_rows.is_empty()
    }

    /// Depth of the subtree rooted here (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.sub_rows.iter().map(Record::depth).max().unwrap_or(0)
    }
}
