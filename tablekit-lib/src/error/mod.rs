//! Error types

mod config;
mod dataset;
mod facet;
mod field;
mod range;

pub use config::*;
pub use dataset::*;
pub use facet::*;
pub use field::*;
pub use range::*;
