//! Row arena: the sorted, grouped forest a row model is made of.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::model::{Field, Record};

use super::{ColumnDef, ColumnSet, SortSpec};

/// Stable row identifier, built from the path of keys leading to the row.
///
/// Top-level record rows use the record id, group rows use `column:value`,
/// and nested rows append `>` plus their own key to the parent's id. Inside a
/// key, `>` and `\` are escaped with a backslash, so ids that contain the
/// separator cannot collide with a nested path. Keys only need to be unique
/// among siblings for the path to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(String);

impl RowId {
    pub const SEPARATOR: char = '>';
    pub const ESCAPE: char = '\\';

    /// Wraps an already-encoded id, as returned by [`RowId::as_str`].
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Encodes a path of raw keys, root first.
    ///
    /// ```
    /// use tablekit_lib::table::RowId;
    ///
    /// assert_eq!(RowId::from_path(["1", "1-2"]).as_str(), "1>1-2");
    /// assert_ne!(RowId::from_path(["a>b"]), RowId::from_path(["a", "b"]));
    /// ```
    pub fn from_path<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut id: Option<RowId> = None;
        for key in keys {
            id = Some(Self::child(id.as_ref(), key.as_ref()));
        }
        id.unwrap_or_else(|| Self(String::new()))
    }

    fn child(parent: Option<&RowId>, key: &str) -> Self {
        let key = escape(key);
        match parent {
            Some(parent) => Self(format!("{}{}{}", parent.0, Self::SEPARATOR, key)),
            None => Self(key.into_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn escape(key: &str) -> Cow<'_, str> {
    if !key.contains([RowId::SEPARATOR, RowId::ESCAPE]) {
        return Cow::Borrowed(key);
    }
    let mut escaped = String::with_capacity(key.len() + 2);
    for c in key.chars() {
        if c == RowId::SEPARATOR || c == RowId::ESCAPE {
            escaped.push(RowId::ESCAPE);
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// What a row displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowKind<'a> {
    /// A dataset record (top-level or a sub-row).
    Record(&'a Record),
    /// A grouping bucket.
    Group {
        column: &'a str,
        field: Field,
        /// First record of the bucket; its `field` value is the group's value.
        representative: &'a Record,
        leaf_count: usize,
    },
}

/// A node in the row arena.
#[derive(Debug, Clone)]
pub struct RowNode<'a> {
    pub id: RowId,
    pub kind: RowKind<'a>,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

impl<'a> RowNode<'a> {
    /// Only rows with at least one child can be expanded.
    pub fn can_expand(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn record(&self) -> Option<&'a Record> {
        match self.kind {
            RowKind::Record(record) => Some(record),
            RowKind::Group { .. } => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, RowKind::Group { .. })
    }

    /// The grouped value, for group rows.
    pub fn group_value(&self) -> Option<String> {
        match self.kind {
            RowKind::Group {
                field,
                representative,
                ..
            } => Some(field.value(representative).to_string()),
            RowKind::Record(_) => None,
        }
    }
}

/// Forest of rows stored in an arena and addressed by index.
///
/// Expansion state is not stored here; see `ExpansionState`.
#[derive(Debug, Clone, Default)]
pub struct RowTree<'a> {
    nodes: Vec<RowNode<'a>>,
    roots: Vec<usize>,
}

impl<'a> RowTree<'a> {
    /// Groups `records` by the `grouping` columns (in order) and sorts every
    /// level by `sort`. Unknown column ids in either are skipped.
    pub fn build(
        records: &[&'a Record],
        columns: &'a ColumnSet,
        sort: &SortSpec,
        grouping: &[String],
    ) -> Self {
        let groups: Vec<&'a ColumnDef> = grouping.iter().filter_map(|id| columns.get(id)).collect();
        let keys: Vec<(Field, bool)> = sort
            .keys()
            .iter()
            .filter_map(|k| columns.get(&k.column).map(|c| (c.field, k.descending)))
            .collect();

        let mut tree = Self::default();
        tree.roots = tree.add_level(records.to_vec(), &groups, &keys, None);
        tree
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn node(&self, index: usize) -> &RowNode<'a> {
        &self.nodes[index]
    }

    pub fn get(&self, index: usize) -> Option<&RowNode<'a>> {
        self.nodes.get(index)
    }

    /// Total number of rows, collapsed or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find(&self, id: &RowId) -> Option<usize> {
        self.nodes.iter().position(|n| &n.id == id)
    }

    /// Ids of every row that has children.
    pub fn expandable_ids(&self) -> impl Iterator<Item = &RowId> {
        self.nodes.iter().filter(|n| n.can_expand()).map(|n| &n.id)
    }

    fn push(&mut self, node: RowNode<'a>) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn add_level(
        &mut self,
        mut records: Vec<&'a Record>,
        groups: &[&'a ColumnDef],
        keys: &[(Field, bool)],
        parent: Option<usize>,
    ) -> Vec<usize> {
        let Some((&column, rest)) = groups.split_first() else {
            records.sort_by(|a, b| compare_records(a, b, keys));
            return records
                .into_iter()
                .map(|record| self.add_record(record, keys, parent))
                .collect();
        };

        // Buckets in first-seen order
        let mut buckets: Vec<(String, Vec<&'a Record>)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for record in records {
            let value = column.field.value(record).to_string();
            match positions.get(&value) {
                Some(&pos) => buckets[pos].1.push(record),
                None => {
                    positions.insert(value.clone(), buckets.len());
                    buckets.push((value, vec![record]));
                }
            }
        }
        buckets.sort_by(|(_, a), (_, b)| compare_group(column.field, a[0], b[0], keys));

        let mut indices = Vec::with_capacity(buckets.len());
        for (value, members) in buckets {
            let id = RowId::child(
                parent.map(|p| &self.nodes[p].id),
                &format!("{}:{}", column.id, value),
            );
            let index = self.push(RowNode {
                id,
                kind: RowKind::Group {
                    column: &column.id,
                    field: column.field,
                    representative: members[0],
                    leaf_count: members.len(),
                },
                parent,
                children: Vec::new(),
            });
            let children = self.add_level(members, rest, keys, Some(index));
            self.nodes[index].children = children;
            indices.push(index);
        }
        indices
    }

    fn add_record(&mut self, record: &'a Record, keys: &[(Field, bool)], parent: Option<usize>) -> usize {
        let id = RowId::child(parent.map(|p| &self.nodes[p].id), &record.id);
        let index = self.push(RowNode {
            id,
            kind: RowKind::Record(record),
            parent,
            children: Vec::new(),
        });

        let mut sub_rows: Vec<&'a Record> = record.sub_rows.iter().collect();
        sub_rows.sort_by(|a, b| compare_records(a, b, keys));
        let children = sub_rows
            .into_iter()
            .map(|child| self.add_record(child, keys, Some(index)))
            .collect();
        self.nodes[index].children = children;
        index
    }
}

fn directed(ordering: Ordering, descending: bool) -> Ordering {
    if descending { ordering.reverse() } else { ordering }
}

fn compare_records(a: &Record, b: &Record, keys: &[(Field, bool)]) -> Ordering {
    keys.iter()
        .map(|&(field, descending)| directed(field.value(a).compare(&field.value(b)), descending))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Groups only respond to sort keys on their own field.
fn compare_group(field: Field, a: &Record, b: &Record, keys: &[(Field, bool)]) -> Ordering {
    keys.iter()
        .filter(|&&(f, _)| f == field)
        .map(|&(f, descending)| directed(f.value(a).compare(&f.value(b)), descending))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::SortKey;

    fn records() -> Vec<Record> {
        vec![
            Record::new("1", "Laptop")
                .with_category("Electronics")
                .with_price(999.0)
                .with_child(Record::new("b", "Bag").with_price(60.0))
                .with_child(Record::new("a", "Adapter").with_price(20.0)),
            Record::new("2", "Desk").with_category("Furniture").with_price(250.0),
            Record::new("3", "Phone").with_category("Electronics").with_price(599.0),
        ]
    }

    fn names<'a>(tree: &RowTree<'a>, indices: &[usize]) -> Vec<&'a str> {
        indices
            .iter()
            .filter_map(|&i| tree.node(i).record())
            .map(|r| r.name.as_str())
            .collect()
    }

    #[test]
    fn test_flat_tree_keeps_order_and_ids() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let columns = ColumnSet::standard();
        let tree = RowTree::build(&refs, &columns, &SortSpec::default(), &[]);

        assert_eq!(names(&tree, tree.roots()), vec!["Laptop", "Desk", "Phone"]);
        assert_eq!(tree.len(), 5);

        let laptop = tree.node(tree.roots()[0]);
        assert!(laptop.can_expand());
        assert_eq!(laptop.id, RowId::new("1"));
        let child = tree.node(laptop.children[0]);
        assert_eq!(child.id, RowId::new("1>b"));
        assert_eq!(child.parent, Some(tree.roots()[0]));
    }

    #[test]
    fn test_sort_applies_to_sub_rows() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let columns = ColumnSet::standard();
        let sort = SortSpec::new(vec![SortKey::ascending("price")]);
        let tree = RowTree::build(&refs, &columns, &sort, &[]);

        assert_eq!(names(&tree, tree.roots()), vec!["Desk", "Phone", "Laptop"]);
        let laptop = tree.node(tree.roots()[2]);
        assert_eq!(names(&tree, &laptop.children), vec!["Adapter", "Bag"]);
    }

    #[test]
    fn test_multi_key_sort() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let columns = ColumnSet::standard();
        let sort = SortSpec::new(vec![
            SortKey::ascending("category"),
            SortKey::descending("price"),
        ]);
        let tree = RowTree::build(&refs, &columns, &sort, &[]);
        assert_eq!(names(&tree, tree.roots()), vec!["Laptop", "Phone", "Desk"]);
    }

    #[test]
    fn test_grouping() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let columns = ColumnSet::standard();
        let tree = RowTree::build(&refs, &columns, &SortSpec::default(), &["category".to_string()]);

        assert_eq!(tree.roots().len(), 2);
        let electronics = tree.node(tree.roots()[0]);
        assert!(electronics.is_group());
        assert_eq!(electronics.id, RowId::new("category:Electronics"));
        assert!(matches!(electronics.kind, RowKind::Group { leaf_count: 2, .. }));
        assert_eq!(names(&tree, &electronics.children), vec!["Laptop", "Phone"]);
        assert_eq!(
            tree.node(electronics.children[0]).id,
            RowId::new("category:Electronics>1")
        );
    }

    #[test]
    fn test_groups_sorted_by_their_own_column_only() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let columns = ColumnSet::standard();
        let grouping = ["category".to_string()];

        let by_price = SortSpec::new(vec![SortKey::ascending("price")]);
        let tree = RowTree::build(&refs, &columns, &by_price, &grouping);
        assert_eq!(tree.node(tree.roots()[0]).id, RowId::new("category:Electronics"));
        let electronics = tree.node(tree.roots()[0]);
        assert_eq!(names(&tree, &electronics.children), vec!["Phone", "Laptop"]);

        let by_category = SortSpec::new(vec![SortKey::descending("category")]);
        let tree = RowTree::build(&refs, &columns, &by_category, &grouping);
        assert_eq!(tree.node(tree.roots()[0]).id, RowId::new("category:Furniture"));
    }

    #[test]
    fn test_find_and_expandable_ids() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let columns = ColumnSet::standard();
        let tree = RowTree::build(&refs, &columns, &SortSpec::default(), &[]);

        assert_eq!(tree.find(&RowId::new("1>a")), tree.node(tree.roots()[0]).children.get(1).copied());
        assert!(tree.find(&RowId::new("missing")).is_none());
        let ids: Vec<&RowId> = tree.expandable_ids().collect();
        assert_eq!(ids, vec![&RowId::new("1")]);
    }

    #[test]
    fn test_separator_in_record_id_does_not_collide() {
        let data = vec![
            Record::new("a", "A").with_child(Record::new("b", "B").with_child(Record::new("c", "C"))),
            Record::new("a>b", "AB").with_child(Record::new("z", "Z")),
        ];
        let refs: Vec<&Record> = data.iter().collect();
        let columns = ColumnSet::standard();
        let tree = RowTree::build(&refs, &columns, &SortSpec::default(), &[]);

        let nested = tree.find(&RowId::from_path(["a", "b"])).unwrap();
        let top = tree.find(&RowId::from_path(["a>b"])).unwrap();
        assert_ne!(nested, top);
        assert_eq!(tree.node(top).id.as_str(), "a\\>b");
        assert_eq!(tree.node(tree.node(top).children[0]).id.as_str(), "a\\>b>z");

        let mut ids: Vec<&RowId> = (0..tree.len()).map(|i| &tree.node(i).id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), tree.len());
    }

    #[test]
    fn test_from_path_escapes_backslash() {
        assert_eq!(RowId::from_path(["a\\", "b"]).as_str(), "a\\\\>b");
        assert_ne!(RowId::from_path(["a\\>b"]), RowId::from_path(["a\\", "b"]));
    }
}
