#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use tablekit_lib::model::{Dataset, Record};

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn item(id: &str, name: &str, category: &str, subcategory: &str, price: f64, created: DateTime<Utc>) -> Record {
    Record::new(id, name)
        .with_category(category)
        .with_subcategory(subcategory)
        .with_price(price)
        .with_created_at(created)
}

/// Twelve top-level records; the laptop carries two levels of sub-rows.
pub fn inventory() -> Dataset {
    Dataset::try_new(vec![
        item("1", "Laptop Pro", "Electronics", "Computers", 999.0, date(2023, 1, 10))
            .with_child(
                item("1-1", "Laptop Sleeve", "Electronics", "Accessories", 29.0, date(2023, 1, 11))
                    .with_child(item("1-1-1", "Sleeve Strap", "Electronics", "Accessories", 5.0, date(2023, 1, 12))),
            )
            .with_child(
                item("1-2", "Laptop Charger", "Electronics", "Accessories", 59.0, date(2023, 1, 11))
                    .with_child(item("1-2-1", "Charger Cable", "Electronics", "Accessories", 9.0, date(2023, 1, 12))),
            ),
        item("2", "Wireless Mouse", "Electronics", "Accessories", 25.0, date(2023, 2, 1)),
        item("3", "Office Chair", "Furniture", "Seating", 189.0, date(2023, 2, 15)),
        item("4", "Standing Desk", "Furniture", "Desks", 499.0, date(2023, 3, 1)),
        item("5", "Desk Lamp", "Furniture", "Lighting", 39.0, date(2023, 3, 20)),
        item("6", "Smartphone", "Electronics", "Phones", 799.0, date(2023, 4, 5)),
        item("7", "Phone Case", "Electronics", "Accessories", 15.0, date(2023, 4, 6)),
        item("8", "Bookshelf", "Furniture", "Storage", 149.0, date(2023, 5, 12)),
        item("9", "Monitor", "Electronics", "Computers", 1299.0, date(2023, 6, 1)),
        item("10", "Notebook", "Stationery", "Paper", 4.0, date(2023, 6, 15)),
        item("11", "Fountain Pen", "Stationery", "Writing", 85.0, date(2023, 7, 1)),
        item("12", "Gaming Chair", "Furniture", "Seating", 1500.0, date(2023, 8, 1)),
    ])
    .unwrap()
}

pub fn ids(records: &[&Record]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}
