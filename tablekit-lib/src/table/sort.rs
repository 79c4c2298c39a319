//! Multi-column sort state

/// One column of the sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub descending: bool,
}

impl SortKey {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }
}

/// Ordered sort keys; earlier keys take precedence.
///
/// This only stores the sort state. The row model applies it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// `Some(descending)` if the column is part of the sort.
    pub fn direction(&self, column: &str) -> Option<bool> {
        self.keys
            .iter()
            .find(|k| k.column == column)
            .map(|k| k.descending)
    }

    /// Advance a column through unsorted → ascending → descending → unsorted.
    ///
    /// A newly sorted column is appended after the existing keys.
    pub fn cycle(&mut self, column: &str) {
        match self.keys.iter().position(|k| k.column == column) {
            Some(pos) if self.keys[pos].descending => {
                self.keys.remove(pos);
            }
            Some(pos) => self.keys[pos].descending = true,
            None => self.keys.push(SortKey::ascending(column)),
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle() {
        let mut spec = SortSpec::default();
        spec.cycle("price");
        assert_eq!(spec.direction("price"), Some(false));
        spec.cycle("name");
        assert_eq!(
            spec.keys(),
            &[SortKey::ascending("price"), SortKey::ascending("name")]
        );
        spec.cycle("price");
        assert_eq!(spec.direction("price"), Some(true));
        spec.cycle("price");
        assert_eq!(spec.direction("price"), None);
        assert_eq!(spec.keys(), &[SortKey::ascending("name")]);
    }
}
