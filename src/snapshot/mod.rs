//! Snapshot module - building, merging, and valuing point-in-time
//! portfolio snapshots.

mod snapshot_builder;
mod snapshot_merger;
mod snapshot_model;

pub use snapshot_model::PortfolioSnapshot;


#[cfg(test)]
mod snapshot_merger_tests;
