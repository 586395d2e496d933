//! Shape model and input validation.
//!
//! The types here are pure: constructing a shape and evaluating its formulas
//! performs no I/O and no validation. Well-formedness checks live in
//! [`validation`] and are applied by the service layer before any formula
//! is evaluated or any record persisted.

pub mod shape;
pub mod validation;

pub use shape::{Circle, Shape, ShapeKind, Triangle};
