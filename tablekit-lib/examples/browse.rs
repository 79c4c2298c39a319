//! Browse Example
//!
//! Drives a table session over a small inventory and prints each step:
//! - Facet checkboxes with counts over the full dataset
//! - Fuzzy name search and category filters
//! - Sorting, grouping and row expansion
//! - Page navigation with the page-number window

use std::fs::File;

use simplelog::{Config, LevelFilter, WriteLogger};
use tablekit_lib::model::Dataset;
use tablekit_lib::table::RowId;
use tablekit_lib::{NO_RESULTS, TableConfig, TableSession, TableView};

const INVENTORY: &str = r#"[
    { "id": "1", "name": "Laptop Pro", "category": "Electronics", "subcategory": "Computers",
      "price": 999.0, "createdAt": "2023-01-10T00:00:00Z", "updatedAt": "2023-01-10T00:00:00Z",
      "subRows": [
        { "id": "1-1", "name": "Laptop Sleeve", "category": "Electronics", "subcategory": "Accessories",
          "price": 29.0, "createdAt": "2023-01-11T00:00:00Z", "updatedAt": "2023-01-11T00:00:00Z" },
        { "id": "1-2", "name": "Laptop Charger", "category": "Electronics", "subcategory": "Accessories",
          "price": 59.0, "createdAt": "2023-01-11T00:00:00Z", "updatedAt": "2023-01-11T00:00:00Z",
          "subRows": [
            { "id": "1-2-1", "name": "Charger Cable", "category": "Electronics", "subcategory": "Accessories",
              "price": 9.0, "createdAt": "2023-01-12T00:00:00Z", "updatedAt": "2023-01-12T00:00:00Z" }
          ] }
      ] },
    { "id": "2", "name": "Wireless Mouse", "category": "Electronics", "subcategory": "Accessories",
      "price": 25.0, "createdAt": "2023-02-01T00:00:00Z", "updatedAt": "2023-02-01T00:00:00Z" },
    { "id": "3", "name": "Office Chair", "category": "Furniture", "subcategory": "Seating",
      "price": 189.0, "createdAt": "2023-02-15T00:00:00Z", "updatedAt": "2023-02-15T00:00:00Z" },
    { "id": "4", "name": "Standing Desk", "category": "Furniture", "subcategory": "Desks",
      "price": 499.0, "createdAt": "2023-03-01T00:00:00Z", "updatedAt": "2023-03-01T00:00:00Z" },
    { "id": "5", "name": "Desk Lamp", "category": "Furniture", "subcategory": "Lighting",
      "price": 39.0, "createdAt": "2023-03-20T00:00:00Z", "updatedAt": "2023-03-20T00:00:00Z" },
    { "id": "6", "name": "Gaming Chair", "category": "Furniture", "subcategory": "Seating",
      "price": 1500.0, "createdAt": "2023-08-01T00:00:00Z", "updatedAt": "2023-08-01T00:00:00Z" },
    { "id": "7", "name": "Notebook", "category": "Stationery", "subcategory": "Paper",
      "price": 4.0, "createdAt": "2023-06-15T00:00:00Z", "updatedAt": "2023-06-15T00:00:00Z" }
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("browse.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let dataset = Dataset::from_json_str(INVENTORY)?;
    let config = TableConfig::from_json_str(r#"{ "page_size": 3 }"#)?;
    let mut session = TableSession::new(dataset, config);

    println!("Categories:");
    for facet in session.category_facets() {
        println!("  [ ] {} ({})", facet.label, facet.count);
    }
    let bounds = session.bounds();
    if let Some((min, max)) = bounds.price {
        println!("Price slider: {min} to {max}");
    }

    print_view("Initial view", &session.view());

    session.next_page();
    print_view("Page 2", &session.view());

    session.set_name_query("chair");
    session.set_price_range(0.0, 2000.0);
    print_view("Name \"chair\", price 0 to 2000", &session.view());

    session.reset_filters();
    session.toggle_row(&RowId::new("1"));
    session.toggle_row(&RowId::new("1>1-2"));
    print_view("Laptop expanded", &session.view());

    session.cycle_sort("price")?;
    session.cycle_sort("price")?;
    print_view("Sorted by price, descending", &session.view());

    session.set_grouping(vec!["category".to_string()])?;
    session.expand_all();
    print_view("Grouped by category", &session.view());

    session.set_grouping(Vec::new())?;
    session.set_category("Garden", true);
    print_view("Category \"Garden\"", &session.view());

    Ok(())
}

fn print_view(title: &str, view: &TableView) {
    println!();
    println!("== {} ==", title);

    if let Some(group) = view.header_groups.first() {
        let labels: Vec<String> = group
            .headers
            .iter()
            .map(|h| match h.sort {
                Some(true) => format!("{} ↓", h.label),
                Some(false) => format!("{} ↑", h.label),
                None => h.label.clone(),
            })
            .collect();
        println!("{}", labels.join(" | "));
    }

    if view.is_empty() {
        println!("{}", NO_RESULTS);
    }
    for row in &view.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| match cell.toggle {
                Some(toggle) => format!("{} {}", toggle.icon(), cell.text),
                None => cell.text.clone(),
            })
            .collect();
        println!("{}{}", " ".repeat(row.indent), cells.join(" | "));
    }

    let pages: Vec<String> = view
        .pagination
        .pages
        .iter()
        .map(|&page| {
            if page == view.pagination.current {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        })
        .collect();
    let ellipsis = if view.pagination.show_ellipsis { " ..." } else { "" };
    println!(
        "{} {}{} {}",
        if view.can_previous_page { "<" } else { " " },
        pages.join(" "),
        ellipsis,
        if view.can_next_page { ">" } else { " " }
    );
}
