//! Positions module - per-instrument holding records.

mod positions_model;

pub use positions_model::{is_quantity_significant, Position};
