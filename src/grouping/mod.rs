//! Grouping module - partitioning snapshot positions by taxonomy.

mod grouping_model;
mod grouping_service;

pub use grouping_model::{CategoryBucket, GroupByTaxonomy};
pub use grouping_service::group_by_taxonomy;
