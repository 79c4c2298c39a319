//! Facet values, counts and range bounds.
//!
//! Everything here is computed over the dataset handed in, which for a table
//! session is always the full, unfiltered dataset: facet counts show the total
//! inventory behind each checkbox, not what remains after other filters.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::FacetError;
use crate::model::{Field, Record};

/// One entry of a categorical filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    pub value: String,
    pub label: String,
    pub count: usize,
}

/// Distinct values of `field`, in first-seen order.
pub fn distinct_values<'a, I>(records: I, field: Field) -> Vec<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    facet_counts(records, field)
        .into_iter()
        .map(|facet| facet.value)
        .collect()
}

/// One facet per distinct value of `field`, in first-seen order, counting
/// occurrences among `records`.
pub fn facet_counts<'a, I>(records: I, field: Field) -> Vec<Facet>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut facets: Vec<Facet> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        let value = field.value(record).to_string();
        match positions.get(&value) {
            Some(&pos) => facets[pos].count += 1,
            None => {
                positions.insert(value.clone(), facets.len());
                facets.push(Facet {
                    label: value.clone(),
                    value,
                    count: 1,
                });
            }
        }
    }

    facets
}

/// Minimum and maximum of a numeric field in one pass.
pub fn numeric_bounds<'a, I>(records: I, field: Field) -> Result<(f64, f64), FacetError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut bounds: Option<(f64, f64)> = None;
    for record in records {
        let value = field.number(record)?;
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }
    bounds.ok_or_else(|| FacetError::empty_dataset(field.name()))
}

/// Earliest and latest value of a timestamp field in one pass.
pub fn date_bounds<'a, I>(
    records: I,
    field: Field,
) -> Result<(DateTime<Utc>, DateTime<Utc>), FacetError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut bounds: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
    for record in records {
        let value = field.timestamp(record)?;
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }
    bounds.ok_or_else(|| FacetError::empty_dataset(field.name()))
}
