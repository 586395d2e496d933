//! Diesel row types for the `shape_calculations` table and conversions to
//! and from the domain types.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

use super::schema::shape_calculations;
use crate::api::{CalculationRecord, NewCalculation};
use crate::db::repository::RepositoryError;
use crate::models::ShapeKind;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shape_calculations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CalculationRow {
    pub id: i64,
    pub shape_type: String,
    pub parameters: Value,
    pub surface: f64,
    pub circumference: f64,
    pub calculated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = shape_calculations)]
pub struct NewCalculationRow {
    pub shape_type: String,
    pub parameters: Value,
    pub surface: f64,
    pub circumference: f64,
    pub calculated_at: DateTime<Utc>,
}

impl From<NewCalculation> for NewCalculationRow {
    fn from(new: NewCalculation) -> Self {
        Self {
            shape_type: new.shape_type.to_string(),
            parameters: serde_json::to_value(&new.parameters)
                .unwrap_or(Value::Object(Default::default())),
            surface: new.surface,
            circumference: new.circumference,
            calculated_at: new.calculated_at,
        }
    }
}

impl TryFrom<CalculationRow> for CalculationRecord {
    type Error = RepositoryError;

    fn try_from(row: CalculationRow) -> Result<Self, Self::Error> {
        let shape_type = ShapeKind::from_str(&row.shape_type).map_err(|e| {
            RepositoryError::internal(format!("Corrupt shape_type in row {}: {}", row.id, e))
        })?;
        let parameters: BTreeMap<String, f64> =
            serde_json::from_value(row.parameters).map_err(|e| {
                RepositoryError::internal(format!("Corrupt parameters in row {}: {}", row.id, e))
            })?;

        Ok(CalculationRecord {
            id: row.id,
            shape_type,
            parameters,
            surface: row.surface,
            circumference: row.circumference,
            calculated_at: row.calculated_at,
        })
    }
}
