//! Taxonomies module - read-only classification hierarchies used to
//! group snapshot positions.

mod taxonomy_model;

pub use taxonomy_model::{Category, Taxonomy};
