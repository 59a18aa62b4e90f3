//! Money module - currency-tagged amounts with safe arithmetic.

mod money_model;

pub use money_model::Money;
