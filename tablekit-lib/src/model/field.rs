//! Field descriptors and cell values

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::Record;
use crate::error::FieldError;

/// A field of `Record` that a column, facet or sort key can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Category,
    Subcategory,
    Price,
    CreatedAt,
    UpdatedAt,
}

/// The kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Timestamp,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Timestamp => "timestamp",
        }
    }
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Field; 7] = [
        Field::Id,
        Field::Name,
        Field::Category,
        Field::Subcategory,
        Field::Price,
        Field::CreatedAt,
        Field::UpdatedAt,
    ];

    /// The camelCase wire name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Category => "category",
            Field::Subcategory => "subcategory",
            Field::Price => "price",
            Field::CreatedAt => "createdAt",
            Field::UpdatedAt => "updatedAt",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Id | Field::Name | Field::Category | Field::Subcategory => FieldKind::Text,
            Field::Price => FieldKind::Number,
            Field::CreatedAt | Field::UpdatedAt => FieldKind::Timestamp,
        }
    }

    /// Reads this field from a record.
    pub fn value<'a>(&self, record: &'a Record) -> CellValue<'a> {
        match self {
            Field::Id => CellValue::Text(&record.id),
            Field::Name => CellValue::Text(&record.name),
            Field::Category => CellValue::Text(&record.category),
            Field::Subcategory => CellValue::Text(&record.subcategory),
            Field::Price => CellValue::Number(record.price),
            Field::CreatedAt => CellValue::Timestamp(record.created_at),
            Field::UpdatedAt => CellValue::Timestamp(record.updated_at),
        }
    }

    /// Reads a numeric field, failing for text and timestamp fields.
    pub fn number(&self, record: &Record) -> Result<f64, FieldError> {
        match self.value(record) {
            CellValue::Number(n) => Ok(n),
            other => Err(FieldError::type_mismatch(
                self.name(),
                FieldKind::Number.as_str(),
                other.kind().as_str(),
            )),
        }
    }

    /// Reads a timestamp field, failing for text and numeric fields.
    pub fn timestamp(&self, record: &Record) -> Result<DateTime<Utc>, FieldError> {
        match self.value(record) {
            CellValue::Timestamp(t) => Ok(t),
            other => Err(FieldError::type_mismatch(
                self.name(),
                FieldKind::Timestamp.as_str(),
                other.kind().as_str(),
            )),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = FieldError;

    /// Accepts the camelCase wire name or its snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Field::Id),
            "name" => Ok(Field::Name),
            "category" => Ok(Field::Category),
            "subcategory" => Ok(Field::Subcategory),
            "price" => Ok(Field::Price),
            "createdAt" | "created_at" => Ok(Field::CreatedAt),
            "updatedAt" | "updated_at" => Ok(Field::UpdatedAt),
            _ => Err(FieldError::missing(s)),
        }
    }
}

/// A value read from a record field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    Number(f64),
    Timestamp(DateTime<Utc>),
}

impl CellValue<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            CellValue::Text(_) => FieldKind::Text,
            CellValue::Number(_) => FieldKind::Number,
            CellValue::Timestamp(_) => FieldKind::Timestamp,
        }
    }

    /// Total order used for sorting.
    ///
    /// Text compares case-insensitively, falling back to the raw strings only
    /// to order values that differ in case alone. Values of one field always
    /// share a kind; mixed kinds order by kind.
    pub fn compare(&self, other: &CellValue<'_>) -> Ordering {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
                .then_with(|| a.cmp(b)),
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Timestamp(a), CellValue::Timestamp(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Text(_) => 0,
            CellValue::Number(_) => 1,
            CellValue::Timestamp(_) => 2,
        }
    }
}

impl fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Timestamp(t) => write!(f, "{}", t.format("%Y-%m-%d")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_names() {
        assert_eq!("createdAt".parse::<Field>().unwrap(), Field::CreatedAt);
        assert_eq!("updated_at".parse::<Field>().unwrap(), Field::UpdatedAt);
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_field_is_missing() {
        let err = "colour".parse::<Field>().unwrap_err();
        assert_eq!(err, FieldError::missing("colour"));
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_number_on_text_field_is_type_mismatch() {
        let record = Record::new("1", "Desk");
        let err = Field::Name.number(&record).unwrap_err();
        assert!(matches!(err, FieldError::TypeMismatch { expected: "number", actual: "text", .. }));
    }

    #[test]
    fn test_cell_display() {
        let record = Record::new("1", "Desk").with_price(12.5);
        assert_eq!(Field::Price.value(&record).to_string(), "12.5");
        assert_eq!(Field::CreatedAt.value(&record).to_string(), "1970-01-01");
    }

    #[test]
    fn test_text_compares_case_insensitively() {
        let apple = CellValue::Text("apple");
        let zebra = CellValue::Text("Zebra");
        assert_eq!(apple.compare(&zebra), Ordering::Less);
        assert_eq!(zebra.compare(&apple), Ordering::Greater);
        // Case only breaks ties
        assert_eq!(CellValue::Text("Desk").compare(&CellValue::Text("desk")), Ordering::Less);
        assert_eq!(CellValue::Text("desk").compare(&CellValue::Text("desk")), Ordering::Equal);
    }
}
