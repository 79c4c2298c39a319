//! Recursive row rendering.
//!
//! A row emits its own visible cells, then, only when expanded, each child one
//! level deeper, in the child sequence's order. Depth is unbounded.

use crate::expansion::ExpansionState;
use crate::model::Field;
use crate::table::{ColumnDef, ColumnSet, RowId, RowKind, RowTree};

/// The expand/collapse control shown on rows that have children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Row is collapsed; activating the control expands it.
    Expand,
    /// Row is expanded; activating the control collapses it.
    Collapse,
}

impl Toggle {
    pub fn icon(&self) -> &'static str {
        match self {
            Toggle::Expand => "▶",
            Toggle::Collapse => "▼",
        }
    }
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    pub column: String,
    pub text: String,
    /// Present on one cell of an expandable row.
    pub toggle: Option<Toggle>,
}

/// One painted table line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub id: RowId,
    /// Nesting level (0 = root).
    pub depth: usize,
    /// Leading indentation in units (`depth * indent_width`).
    pub indent: usize,
    pub is_group: bool,
    pub can_expand: bool,
    pub expanded: bool,
    pub cells: Vec<RenderedCell>,
}

impl RenderedRow {
    pub fn cell(&self, column: &str) -> Option<&RenderedCell> {
        self.cells.iter().find(|c| c.column == column)
    }

    pub fn toggle(&self) -> Option<Toggle> {
        self.cells.iter().find_map(|c| c.toggle)
    }
}

/// Renders rows of a [`RowTree`] against an expansion overlay.
#[derive(Debug, Clone, Copy)]
pub struct RowRenderer<'r, 'a> {
    tree: &'r RowTree<'a>,
    expansion: &'r ExpansionState,
    columns: &'r ColumnSet,
    indent_width: usize,
}

impl<'r, 'a> RowRenderer<'r, 'a> {
    pub fn new(tree: &'r RowTree<'a>, expansion: &'r ExpansionState, columns: &'r ColumnSet) -> Self {
        Self {
            tree,
            expansion,
            columns,
            indent_width: 2,
        }
    }

    pub fn indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    /// Renders each of `roots` at depth 0 with their expanded descendants.
    pub fn render_rows(&self, roots: &[usize]) -> Vec<RenderedRow> {
        let mut out = Vec::new();
        for &root in roots {
            self.render(root, 0, &mut out);
        }
        out
    }

    /// Renders `row` at `depth`, then its children at `depth + 1` if expanded.
    pub fn render(&self, row: usize, depth: usize, out: &mut Vec<RenderedRow>) {
        let node = self.tree.node(row);
        let can_expand = node.can_expand();
        let expanded = can_expand && self.expansion.is_expanded(&node.id);

        let toggle = can_expand.then_some(if expanded {
            Toggle::Collapse
        } else {
            Toggle::Expand
        });
        let toggle_column = self.toggle_column();

        let cells = self
            .columns
            .visible()
            .map(|column| RenderedCell {
                column: column.id.clone(),
                text: cell_text(&node.kind, column),
                toggle: if Some(column.id.as_str()) == toggle_column {
                    toggle
                } else {
                    None
                },
            })
            .collect();

        out.push(RenderedRow {
            id: node.id.clone(),
            depth,
            indent: depth * self.indent_width,
            is_group: node.is_group(),
            can_expand,
            expanded,
            cells,
        });

        if expanded {
            for &child in &node.children {
                self.render(child, depth + 1, out);
            }
        }
    }

    /// The name column carries the control; the first visible column does when
    /// name is hidden.
    fn toggle_column(&self) -> Option<&'r str> {
        let name = Field::Name.name();
        if self.columns.is_visible(name) {
            return Some(name);
        }
        self.columns.visible().next().map(|c| c.id.as_str())
    }
}

fn cell_text(kind: &RowKind<'_>, column: &ColumnDef) -> String {
    match *kind {
        RowKind::Record(record) => column.field.value(record).to_string(),
        RowKind::Group {
            column: grouped,
            field,
            representative,
            leaf_count,
        } if grouped == column.id => {
            format!("{} ({})", field.value(representative), leaf_count)
        }
        RowKind::Group { .. } => String::new(),
    }
}
