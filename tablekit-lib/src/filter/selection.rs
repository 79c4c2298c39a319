//! Filter selection state

use std::collections::BTreeSet;

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::error::RangeError;

/// Closed price interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    /// Inclusive at both ends; an inverted range contains nothing.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl From<(f64, f64)> for PriceRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

/// Closed timestamp interval with optional ends.
///
/// The range only filters when both ends are set; a half-open range is
/// inactive rather than one-sided.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Whole calendar days: from the start of `first` through the last
    /// millisecond of `last`, in UTC.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        let from = first.and_time(chrono::NaiveTime::MIN).and_utc();
        let to = last
            .checked_add_days(Days::new(1))
            .map(|next| {
                next.and_time(chrono::NaiveTime::MIN).and_utc() - chrono::Duration::milliseconds(1)
            })
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self::between(from, to)
    }

    /// The bounds when both are present.
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.from.zip(self.to)
    }

    pub fn is_active(&self) -> bool {
        self.bounds().is_some()
    }

    pub fn is_inverted(&self) -> bool {
        self.bounds().is_some_and(|(from, to)| from > to)
    }

    /// Inclusive at both ends. An inactive range contains everything.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        match self.bounds() {
            Some((from, to)) => at >= from && at <= to,
            None => true,
        }
    }
}

/// The user's current filter choices.
///
/// An empty `category` or `subcategory` set disables that predicate. The price
/// predicate always applies.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    pub name: String,
    pub category: BTreeSet<String>,
    pub subcategory: BTreeSet<String>,
    pub price: PriceRange,
    pub created_at: DateRange,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::with_price_range(PriceRange::new(0.0, 1000.0))
    }
}

impl FilterSelection {
    /// An empty selection starting from the given price range.
    pub fn with_price_range(price: impl Into<PriceRange>) -> Self {
        Self {
            name: String::new(),
            category: BTreeSet::new(),
            subcategory: BTreeSet::new(),
            price: price.into(),
            created_at: DateRange::default(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn categories<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn subcategories<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subcategory = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn price(mut self, min: f64, max: f64) -> Self {
        self.price = PriceRange::new(min, max);
        self
    }

    pub fn created_between(mut self, range: DateRange) -> Self {
        self.created_at = range;
        self
    }

    /// Checkbox semantics: add the value when checked, remove it otherwise.
    /// Returns true if the set changed.
    pub fn set_category(&mut self, value: &str, checked: bool) -> bool {
        toggle(&mut self.category, value, checked)
    }

    /// Checkbox semantics for the subcategory set.
    pub fn set_subcategory(&mut self, value: &str, checked: bool) -> bool {
        toggle(&mut self.subcategory, value, checked)
    }

    /// Clears every predicate and restarts the price range at `price`.
    pub fn reset(&mut self, price: impl Into<PriceRange>) {
        *self = Self::with_price_range(price);
    }

    /// Reports an inverted price or date range.
    pub fn validate(&self) -> Result<(), RangeError> {
        if self.price.is_inverted() {
            return Err(RangeError::Price {
                min: self.price.min,
                max: self.price.max,
            });
        }
        if let Some((from, to)) = self.created_at.bounds()
            && from > to
        {
            return Err(RangeError::Date { from, to });
        }
        Ok(())
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str, checked: bool) -> bool {
    if checked {
        set.insert(value.to_string())
    } else {
        set.remove(value)
    }
}
