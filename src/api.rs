//! Core data types shared across the service, persistence, and HTTP layers.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ShapeKind;

/// A single persisted shape computation.
///
/// Records are append-only: the store assigns `id` on creation and no update
/// or delete operation exists anywhere in the crate. `parameters` holds the
/// submitted inputs verbatim (post-validation), keyed by parameter name
/// (`radius` for circles, `a`/`b`/`c` for triangles).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    /// Store-assigned identifier, unique and never reused.
    pub id: i64,
    /// Which shape was computed.
    pub shape_type: ShapeKind,
    /// Submitted parameters, name to value.
    pub parameters: BTreeMap<String, f64>,
    /// Computed area.
    pub surface: f64,
    /// Computed perimeter.
    pub circumference: f64,
    /// Creation timestamp, set once by the service.
    pub calculated_at: DateTime<Utc>,
}

/// A computation about to be persisted. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCalculation {
    pub shape_type: ShapeKind,
    pub parameters: BTreeMap<String, f64>,
    pub surface: f64,
    pub circumference: f64,
    pub calculated_at: DateTime<Utc>,
}

impl NewCalculation {
    /// Attach a store-assigned id, producing the persisted record.
    pub fn into_record(self, id: i64) -> CalculationRecord {
        CalculationRecord {
            id,
            shape_type: self.shape_type,
            parameters: self.parameters,
            surface: self.surface,
            circumference: self.circumference,
            calculated_at: self.calculated_at,
        }
    }
}

/// Aggregate metrics over all records of one shape type.
///
/// Derived, never stored: each query recomputes the averages from a fresh
/// scan, so the result always reflects current store state. A query over a
/// type with no records yields no `ShapeStats` at all (`Option::None` at the
/// repository boundary), keeping "no data" distinguishable from a populated
/// zero-average aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStats {
    pub shape_type: ShapeKind,
    pub avg_surface: f64,
    pub avg_circumference: f64,
    pub count: u64,
}
