//! Data-table core
//!
//! Faceted filtering (fuzzy name, category, subcategory, price, created-at),
//! sorting, grouping, expandable nested rows, column visibility and
//! pagination over an immutable in-memory dataset.
//!
//! ```
//! use tablekit_lib::model::{Dataset, Record};
//! use tablekit_lib::{TableConfig, TableSession};
//!
//! let dataset = Dataset::new(vec![
//!     Record::new("1", "Laptop").with_category("Electronics").with_price(999.0),
//!     Record::new("2", "Desk").with_category("Furniture").with_price(250.0),
//! ]);
//! let mut session = TableSession::new(dataset, TableConfig::default());
//! session.set_category("Furniture", true);
//!
//! let view = session.view();
//! assert_eq!(view.rows.len(), 1);
//! assert_eq!(view.rows[0].cell("name").unwrap().text, "Desk");
//! ```

pub mod config;
pub mod error;
pub mod expansion;
pub mod facet;
pub mod filter;
pub mod fuzzy;
pub mod model;
pub mod pagination;
pub mod render;
pub mod session;
pub mod table;

pub use config::TableConfig;
pub use session::{NO_RESULTS, TableSession, TableView};
