//! Business logic layer.
//!
//! [`calculator::GeometryCalculator`] orchestrates validation, formula
//! evaluation, persistence, and aggregate queries over the history store.

pub mod calculator;

pub use calculator::{GeometryCalculator, GeometryError};
