//! Facet filtering over the top-level records of a dataset.

mod engine;
mod selection;

pub use engine::*;
pub use selection::*;
