//! In-crate grid engine.

use crate::error::FieldError;
use crate::expansion::ExpansionState;
use crate::model::{Dataset, Record};
use crate::pagination::Pager;

use super::{ColumnSet, Header, HeaderGroup, RowModel, RowTree, SortSpec, TableModel};

/// Sorts, groups, globally filters and paginates a selection of dataset rows.
///
/// Every query rebuilds the row model from the selected records. Changing the
/// data, sort, grouping or global filter returns to the first page; expanding
/// rows and toggling columns does not.
#[derive(Debug, Clone)]
pub struct GridModel {
    dataset: Dataset,
    rows: Vec<usize>,
    columns: ColumnSet,
    sort: SortSpec,
    grouping: Vec<String>,
    global_filter: String,
    expansion: ExpansionState,
    pager: Pager,
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new(ColumnSet::standard(), 10)
    }
}

impl GridModel {
    pub fn new(columns: ColumnSet, page_size: usize) -> Self {
        Self {
            dataset: Dataset::default(),
            rows: Vec::new(),
            columns,
            sort: SortSpec::default(),
            grouping: Vec::new(),
            global_filter: String::new(),
            expansion: ExpansionState::new(),
            pager: Pager::new(page_size),
        }
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pager.set_page_size(page_size);
    }

    /// Selected records, skipping positions outside the dataset.
    fn selected(&self) -> impl Iterator<Item = &Record> {
        let records = self.dataset.records();
        self.rows.iter().filter_map(move |&index| records.get(index))
    }

    /// Top-level records passing the global filter, in data order.
    fn filtered(&self) -> Vec<&Record> {
        let query = self.global_filter.trim().to_lowercase();
        if query.is_empty() {
            return self.selected().collect();
        }
        self.selected()
            .filter(|record| {
                self.columns
                    .visible()
                    .any(|c| c.field.value(record).to_string().to_lowercase().contains(&query))
            })
            .collect()
    }

    fn tree(&self) -> RowTree<'_> {
        RowTree::build(&self.filtered(), &self.columns, &self.sort, &self.grouping)
    }

    /// Recount top-level rows after anything that changes them.
    fn refresh(&mut self, reset_page: bool) {
        let rows = self.tree().roots().len();
        self.pager.set_row_count(rows);
        if reset_page {
            self.pager.reset();
        }
        log::debug!(
            "Grid holds {} records, {} top-level rows, {} pages",
            self.rows.len(),
            rows,
            self.pager.page_count()
        );
    }
}

impl TableModel for GridModel {
    fn set_data(&mut self, dataset: Dataset, rows: Vec<usize>) {
        self.dataset = dataset;
        self.rows = rows;
        self.refresh(true);
    }

    fn data(&self) -> Vec<&Record> {
        self.selected().collect()
    }

    fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    fn header_groups(&self) -> Vec<HeaderGroup> {
        let headers = self
            .columns
            .visible()
            .map(|c| Header {
                column: c.id.clone(),
                label: c.header.clone(),
                sort: self.sort.direction(&c.id),
                grouped: self.grouping.contains(&c.id),
            })
            .collect();
        vec![HeaderGroup {
            id: "0".to_string(),
            depth: 0,
            headers,
        }]
    }

    fn row_model(&self) -> RowModel<'_> {
        RowModel {
            tree: self.tree(),
            page: self.pager.page_range(),
        }
    }

    fn sort_spec(&self) -> &SortSpec {
        &self.sort
    }

    fn cycle_sort(&mut self, column: &str) -> Result<(), FieldError> {
        let def = self.columns.require(column)?;
        if !def.sortable {
            log::debug!("Column '{}' is not sortable", column);
            return Ok(());
        }
        self.sort.cycle(column);
        self.refresh(true);
        Ok(())
    }

    fn grouping(&self) -> &[String] {
        &self.grouping
    }

    fn set_grouping(&mut self, columns: Vec<String>) -> Result<(), FieldError> {
        for id in &columns {
            let def = self.columns.require(id)?;
            if !def.groupable {
                return Err(FieldError::NotGroupable { column: id.clone() });
            }
        }
        self.grouping = columns;
        self.refresh(true);
        Ok(())
    }

    fn global_filter(&self) -> &str {
        &self.global_filter
    }

    fn set_global_filter(&mut self, query: &str) {
        if self.global_filter != query {
            self.global_filter = query.to_string();
            self.refresh(true);
        }
    }

    fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    fn expansion_mut(&mut self) -> &mut ExpansionState {
        &mut self.expansion
    }

    fn page_size(&self) -> usize {
        self.pager.page_size()
    }

    fn page_count(&self) -> usize {
        self.pager.page_count()
    }

    fn current_page_index(&self) -> usize {
        self.pager.page_index()
    }

    fn set_page_index(&mut self, index: usize) {
        self.pager.set_page_index(index);
    }

    fn previous_page(&mut self) {
        self.pager.previous_page();
    }

    fn next_page(&mut self) {
        self.pager.next_page();
    }

    fn can_previous_page(&self) -> bool {
        self.pager.can_previous_page()
    }

    fn can_next_page(&self) -> bool {
        self.pager.can_next_page()
    }

    fn is_column_visible(&self, column: &str) -> bool {
        self.columns.is_visible(column)
    }

    fn toggle_column_visibility(&mut self, column: &str) -> Result<bool, FieldError> {
        let visible = self.columns.toggle_visibility(column)?;
        // The global filter only looks at visible columns
        if !self.global_filter.trim().is_empty() {
            self.refresh(false);
        }
        Ok(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RowId;

    fn records(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| {
                Record::new(i.to_string(), format!("Item {i}"))
                    .with_category(if i % 2 == 0 { "Even" } else { "Odd" })
                    .with_price(i as f64)
            })
            .collect()
    }

    fn load(model: &mut GridModel, n: usize) {
        model.set_data(Dataset::new(records(n)), (0..n).collect());
    }

    fn page_ids(model: &GridModel) -> Vec<String> {
        let rows = model.row_model();
        rows.page_roots()
            .iter()
            .map(|&i| rows.tree.node(i).id.to_string())
            .collect()
    }

    #[test]
    fn test_pagination() {
        let mut model = GridModel::new(ColumnSet::standard(), 3);
        load(&mut model, 12);
        assert_eq!(model.page_count(), 4);
        assert_eq!(page_ids(&model), vec!["1", "2", "3"]);

        model.next_page();
        assert_eq!(model.current_page_index(), 1);
        assert_eq!(page_ids(&model), vec!["4", "5", "6"]);

        model.set_page_index(10);
        assert_eq!(model.current_page_index(), 3);
        assert!(!model.can_next_page());
        assert!(model.can_previous_page());
    }

    #[test]
    fn test_set_data_resets_page() {
        let mut model = GridModel::new(ColumnSet::standard(), 3);
        load(&mut model, 12);
        model.set_page_index(2);
        load(&mut model, 12);
        assert_eq!(model.current_page_index(), 0);
    }

    #[test]
    fn test_rows_select_and_order_shared_records() {
        let dataset = Dataset::new(records(5));
        let mut model = GridModel::new(ColumnSet::standard(), 10);
        model.set_data(dataset.clone(), vec![4, 0, 2, 99]);
        assert_eq!(page_ids(&model), vec!["5", "1", "3"]);
        assert!(std::ptr::eq(model.data()[1], &dataset.records()[0]));
    }

    #[test]
    fn test_cycle_sort_unknown_column() {
        let mut model = GridModel::default();
        assert_eq!(
            model.cycle_sort("colour").unwrap_err(),
            FieldError::unknown_column("colour")
        );
    }

    #[test]
    fn test_cycle_sort_descending() {
        let mut model = GridModel::new(ColumnSet::standard(), 3);
        load(&mut model, 12);
        model.cycle_sort("price").unwrap();
        model.cycle_sort("price").unwrap();
        assert_eq!(page_ids(&model), vec!["12", "11", "10"]);

        let groups = model.header_groups();
        let price = groups[0].headers.iter().find(|h| h.column == "price").unwrap();
        assert_eq!(price.sort, Some(true));
    }

    #[test]
    fn test_global_filter_on_visible_columns() {
        let mut model = GridModel::new(ColumnSet::standard(), 10);
        load(&mut model, 12);
        model.set_global_filter("even");
        assert_eq!(model.row_model().tree.roots().len(), 6);

        // Hiding the matching column drops the matches
        model.toggle_column_visibility("category").unwrap();
        assert_eq!(model.row_model().tree.roots().len(), 0);
        assert_eq!(model.page_count(), 0);
        assert_eq!(model.data().len(), 12);
    }

    #[test]
    fn test_grouping_paginates_groups() {
        let mut model = GridModel::new(ColumnSet::standard(), 1);
        load(&mut model, 12);
        model.set_grouping(vec!["category".into()]).unwrap();
        assert_eq!(model.page_count(), 2);
        assert_eq!(page_ids(&model), vec!["category:Odd"]);

        let groups = model.header_groups();
        assert!(groups[0].headers.iter().any(|h| h.column == "category" && h.grouped));
    }

    #[test]
    fn test_ungroupable_column_rejected() {
        let columns = ColumnSet::new(vec![
            crate::table::ColumnDef::new("name", "Name", crate::model::Field::Name).groupable(false),
        ])
        .unwrap();
        let mut model = GridModel::new(columns, 10);
        assert!(matches!(
            model.set_grouping(vec!["name".into()]),
            Err(FieldError::NotGroupable { .. })
        ));
        assert!(model.grouping().is_empty());
    }

    #[test]
    fn test_expansion_survives_paging() {
        let mut model = GridModel::new(ColumnSet::standard(), 3);
        load(&mut model, 12);
        let id = RowId::new("1");
        model.expansion_mut().expand(&id);
        model.next_page();
        assert!(model.expansion().is_expanded(&id));
    }
}
