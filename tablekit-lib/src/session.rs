//! Table session: filter state, facets and the grid model wired together.

use chrono::{DateTime, Utc};

use crate::config::TableConfig;
use crate::error::{FacetError, FieldError, RangeError};
use crate::facet::{self, Facet};
use crate::filter::{DateRange, FilterEngine, FilterSelection};
use crate::fuzzy::FuzzyIndex;
use crate::model::{Dataset, Field, Record};
use crate::pagination::PageWindow;
use crate::render::{RenderedRow, RowRenderer};
use crate::table::{ColumnSet, GridModel, HeaderGroup, RowId, TableModel};

/// Text shown in place of rows when nothing matches.
pub const NO_RESULTS: &str = "No results.";

/// Everything needed to paint the table once.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub header_groups: Vec<HeaderGroup>,
    /// Rows of the current page with their expanded descendants.
    pub rows: Vec<RenderedRow>,
    pub pagination: PageWindow,
    pub page_count: usize,
    pub can_previous_page: bool,
    pub can_next_page: bool,
    /// Top-level records passing the facet filters.
    pub filtered_count: usize,
    pub category_facets: Vec<Facet>,
    pub subcategory_facets: Vec<Facet>,
    pub bounds: RangeBounds,
}

impl TableView {
    /// True when the "No results." state should be shown.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Bounds for the range controls. `None` when the dataset is empty, in which
/// case the control should be disabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBounds {
    pub price: Option<(f64, f64)>,
    pub created_at: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

/// One user's table: the immutable dataset, the current filter selection and
/// a grid model.
///
/// Every action recomputes from the dataset: the filter engine produces a fresh
/// subset which replaces the model's data. Facets and bounds are computed once
/// over the full dataset and do not follow the filters.
#[derive(Debug, Clone)]
pub struct TableSession<M: TableModel = GridModel> {
    config: TableConfig,
    engine: FilterEngine,
    selection: FilterSelection,
    model: M,
    category_facets: Vec<Facet>,
    subcategory_facets: Vec<Facet>,
    bounds: RangeBounds,
}

impl TableSession<GridModel> {
    /// A session over all record fields.
    pub fn new(dataset: Dataset, config: TableConfig) -> Self {
        Self::with_columns(dataset, ColumnSet::standard(), config)
    }

    pub fn with_columns(dataset: Dataset, columns: ColumnSet, config: TableConfig) -> Self {
        let model = GridModel::new(columns, config.page_size);
        Self::with_model(dataset, model, config)
    }
}

impl<M: TableModel> TableSession<M> {
    /// A session driving a caller-supplied grid engine.
    pub fn with_model(dataset: Dataset, model: M, config: TableConfig) -> Self {
        let index = FuzzyIndex::with_threshold(&dataset, config.fuzzy_threshold);
        let bounds = RangeBounds {
            price: optional_bounds(facet::numeric_bounds(&dataset, Field::Price)),
            created_at: optional_bounds(facet::date_bounds(&dataset, Field::CreatedAt)),
        };
        let mut session = Self {
            selection: FilterSelection::with_price_range(config.default_price_range),
            category_facets: facet::facet_counts(&dataset, Field::Category),
            subcategory_facets: facet::facet_counts(&dataset, Field::Subcategory),
            engine: FilterEngine::with_index(index),
            bounds,
            model,
            config,
        };
        session.refilter();
        log::info!(
            "Table session over {} records ({} categories, {} subcategories)",
            session.dataset().len(),
            session.category_facets.len(),
            session.subcategory_facets.len()
        );
        session
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn dataset(&self) -> &Dataset {
        self.engine.dataset()
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Category checkboxes with counts over the full dataset.
    pub fn category_facets(&self) -> &[Facet] {
        &self.category_facets
    }

    /// Subcategory checkboxes with counts over the full dataset.
    pub fn subcategory_facets(&self) -> &[Facet] {
        &self.subcategory_facets
    }

    pub fn bounds(&self) -> RangeBounds {
        self.bounds
    }

    /// The filtered top-level records, as handed to the model.
    pub fn filtered(&self) -> Vec<&Record> {
        self.model.data()
    }

    /// Inverted range in the current selection, if any.
    pub fn range_problem(&self) -> Option<RangeError> {
        self.selection.validate().err()
    }

    // -------------------------------------------------------------------------
    // Filter actions
    // -------------------------------------------------------------------------

    pub fn set_name_query(&mut self, query: &str) {
        self.selection.name = query.to_string();
        self.refilter();
    }

    pub fn set_category(&mut self, value: &str, checked: bool) {
        if self.selection.set_category(value, checked) {
            self.refilter();
        }
    }

    pub fn set_subcategory(&mut self, value: &str, checked: bool) {
        if self.selection.set_subcategory(value, checked) {
            self.refilter();
        }
    }

    pub fn set_price_range(&mut self, min: f64, max: f64) {
        self.selection.price = (min, max).into();
        self.refilter();
    }

    pub fn set_created_range(&mut self, range: DateRange) {
        self.selection.created_at = range;
        self.refilter();
    }

    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
        self.refilter();
    }

    /// Back to an empty selection with the configured price range.
    pub fn reset_filters(&mut self) {
        self.selection.reset(self.config.default_price_range);
        self.refilter();
    }

    pub fn set_global_filter(&mut self, query: &str) {
        self.model.set_global_filter(query);
    }

    // -------------------------------------------------------------------------
    // Table actions
    // -------------------------------------------------------------------------

    pub fn cycle_sort(&mut self, column: &str) -> Result<(), FieldError> {
        self.model.cycle_sort(column)
    }

    pub fn set_grouping(&mut self, columns: Vec<String>) -> Result<(), FieldError> {
        self.model.set_grouping(columns)
    }

    pub fn toggle_column_visibility(&mut self, column: &str) -> Result<bool, FieldError> {
        self.model.toggle_column_visibility(column)
    }

    /// Expands or collapses a row that has children.
    ///
    /// Returns the new state, or `None` if the row is unknown or a leaf.
    pub fn toggle_row(&mut self, id: &RowId) -> Option<bool> {
        let expandable = {
            let rows = self.model.row_model();
            rows.tree
                .find(id)
                .is_some_and(|index| rows.tree.node(index).can_expand())
        };
        if !expandable {
            log::debug!("Ignoring toggle on non-expandable row '{}'", id);
            return None;
        }
        Some(self.model.expansion_mut().toggle(id))
    }

    pub fn expand_all(&mut self) {
        let ids: Vec<RowId> = {
            let rows = self.model.row_model();
            rows.tree.expandable_ids().cloned().collect()
        };
        let expansion = self.model.expansion_mut();
        for id in &ids {
            expansion.expand(id);
        }
    }

    pub fn collapse_all(&mut self) {
        self.model.expansion_mut().collapse_all();
    }

    pub fn previous_page(&mut self) {
        self.model.previous_page();
    }

    pub fn next_page(&mut self) {
        self.model.next_page();
    }

    /// Jumps to a 1-indexed page number, clamped to the available pages.
    pub fn set_page(&mut self, page_number: usize) {
        self.model.set_page_index(page_number.saturating_sub(1));
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    pub fn view(&self) -> TableView {
        let rows = self.model.row_model();
        let rendered = RowRenderer::new(&rows.tree, self.model.expansion(), self.model.columns())
            .indent_width(self.config.indent_width)
            .render_rows(rows.page_roots());

        let page_count = self.model.page_count();
        let current = if page_count == 0 {
            0
        } else {
            self.model.current_page_index() + 1
        };

        TableView {
            header_groups: self.model.header_groups(),
            rows: rendered,
            pagination: PageWindow::new(page_count, current, self.config.max_visible_pages),
            page_count,
            can_previous_page: self.model.can_previous_page(),
            can_next_page: self.model.can_next_page(),
            filtered_count: self.model.data().len(),
            category_facets: self.category_facets.clone(),
            subcategory_facets: self.subcategory_facets.clone(),
            bounds: self.bounds,
        }
    }

    fn refilter(&mut self) {
        let rows = self.engine.apply_indices(&self.selection);
        let dataset = self.dataset().clone();
        self.model.set_data(dataset, rows);
    }
}

fn optional_bounds<T>(bounds: Result<T, FacetError>) -> Option<T> {
    match bounds {
        Ok(bounds) => Some(bounds),
        Err(e) => {
            log::debug!("Range control disabled: {}", e);
            None
        }
    }
}
