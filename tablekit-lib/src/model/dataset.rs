//! The immutable in-memory dataset

use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;

use super::Record;
use crate::error::DatasetError;

/// An ordered, immutable sequence of top-level records.
///
/// Cloning is cheap; clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Arc<[Record]>,
}

impl Dataset {
    /// Wraps records without validating them.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Wraps records after checking sibling id uniqueness and prices.
    pub fn try_new(records: Vec<Record>) -> Result<Self, DatasetError> {
        validate_level(&records, "")?;
        Ok(Self::new(records))
    }

    /// Parses a JSON array of records. Nesting depth is not limited; deep
    /// `subRows` chains grow the stack on demand instead of overflowing.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        deserializer.disable_recursion_limit();
        let records = Vec::<Record>::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
        deserializer.end()?;
        let dataset = Self::try_new(records)?;
        log::debug!("Loaded dataset with {} top-level records", dataset.len());
        Ok(dataset)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of levels in the forest (0 for an empty dataset).
    pub fn max_depth(&self) -> usize {
        self.records.iter().map(Record::depth).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn validate_level(records: &[Record], parent: &str) -> Result<(), DatasetError> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(DatasetError::DuplicateId {
                id: record.id.clone(),
                parent: parent.to_string(),
            });
        }
        if record.price < 0.0 {
            return Err(DatasetError::NegativePrice {
                id: record.id.clone(),
                price: record.price,
            });
        }
        validate_level(&record.sub_rows, &record.id)?;
    }
    Ok(())
}
