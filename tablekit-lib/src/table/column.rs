//! Column definitions and visibility

use std::collections::HashSet;

use crate::error::FieldError;
use crate::model::Field;

/// A table column bound to one record field.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnDef {
    /// Unique identifier for this column.
    pub id: String,
    /// Header text displayed at the top.
    pub header: String,
    /// The record field this column reads.
    pub field: Field,
    /// Whether the column takes part in sorting.
    pub sortable: bool,
    /// Whether rows may be grouped by this column.
    pub groupable: bool,
}

impl ColumnDef {
    /// Create a sortable, groupable column over `field`.
    pub fn new(id: impl Into<String>, header: impl Into<String>, field: Field) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            field,
            sortable: true,
            groupable: true,
        }
    }

    /// Create a column from a field name, failing if `Record` has no such field.
    pub fn from_field_name(
        id: impl Into<String>,
        header: impl Into<String>,
        field: &str,
    ) -> Result<Self, FieldError> {
        Ok(Self::new(id, header, field.parse()?))
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn groupable(mut self, groupable: bool) -> Self {
        self.groupable = groupable;
        self
    }
}

/// An ordered, validated set of columns plus their visibility.
#[derive(Clone, Debug)]
pub struct ColumnSet {
    columns: Vec<ColumnDef>,
    hidden: HashSet<String>,
}

impl Default for ColumnSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl ColumnSet {
    /// Validates column ids are unique. All columns start visible.
    pub fn new(columns: Vec<ColumnDef>) -> Result<Self, FieldError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.id.as_str()) {
                return Err(FieldError::duplicate_column(&column.id));
            }
        }
        Ok(Self {
            columns,
            hidden: HashSet::new(),
        })
    }

    /// One column per record field, ids matching the field names.
    pub fn standard() -> Self {
        let header = |field: Field| match field {
            Field::Id => "ID",
            Field::Name => "Name",
            Field::Category => "Category",
            Field::Subcategory => "Subcategory",
            Field::Price => "Price",
            Field::CreatedAt => "Created At",
            Field::UpdatedAt => "Updated At",
        };
        Self {
            columns: Field::ALL
                .iter()
                .map(|&field| ColumnDef::new(field.name(), header(field), field))
                .collect(),
            hidden: HashSet::new(),
        }
    }

    /// All columns in order, hidden ones included.
    pub fn all(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Like `get`, but an unknown id is an error.
    pub fn require(&self, id: &str) -> Result<&ColumnDef, FieldError> {
        self.get(id).ok_or_else(|| FieldError::unknown_column(id))
    }

    /// Visible columns in order.
    pub fn visible(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| !self.hidden.contains(&c.id))
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.get(id).is_some() && !self.hidden.contains(id)
    }

    pub fn set_visible(&mut self, id: &str, visible: bool) -> Result<(), FieldError> {
        self.require(id)?;
        if visible {
            self.hidden.remove(id);
        } else {
            self.hidden.insert(id.to_string());
        }
        Ok(())
    }

    /// Flips visibility and returns the new state.
    pub fn toggle_visibility(&mut self, id: &str) -> Result<bool, FieldError> {
        let visible = !self.is_visible(id);
        self.set_visible(id, visible)?;
        Ok(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_field_name_rejects_missing_field() {
        let err = ColumnDef::from_field_name("colour", "Colour", "colour").unwrap_err();
        assert_eq!(err, FieldError::missing("colour"));

        let column = ColumnDef::from_field_name("created", "Created", "createdAt").unwrap();
        assert_eq!(column.field, Field::CreatedAt);
    }

    #[test]
    fn test_duplicate_column_ids_rejected() {
        let columns = vec![
            ColumnDef::new("name", "Name", Field::Name),
            ColumnDef::new("name", "Other", Field::Category),
        ];
        assert_eq!(
            ColumnSet::new(columns).unwrap_err(),
            FieldError::duplicate_column("name")
        );
    }

    #[test]
    fn test_toggle_visibility() {
        let mut columns = ColumnSet::standard();
        assert_eq!(columns.len(), 7);
        assert!(columns.is_visible("price"));

        assert!(!columns.toggle_visibility("price").unwrap());
        assert!(!columns.is_visible("price"));
        assert_eq!(columns.visible().count(), 6);
        assert_eq!(columns.all().len(), 7);

        assert!(columns.toggle_visibility("price").unwrap());
        assert!(columns.is_visible("price"));
    }

    #[test]
    fn test_unknown_column_visibility() {
        let mut columns = ColumnSet::standard();
        assert!(!columns.is_visible("colour"));
        assert_eq!(
            columns.toggle_visibility("colour").unwrap_err(),
            FieldError::unknown_column("colour")
        );
    }
}
