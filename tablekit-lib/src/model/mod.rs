//! Record data model

mod dataset;
mod field;
mod record;

pub use dataset::*;
pub use field::*;
pub use record::*;
