//! Data Transfer Objects for the HTTP API.
//!
//! Field names and the `calculatedAt` format are the binding contract with
//! the dashboard client, which polls `/api/history` and `/api/stats/*`
//! after each calculation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{CalculationRecord, ShapeStats};
use crate::models::ShapeKind;

/// Timestamp format consumed by the client-side date parser.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Response for `GET /api/circle/{radius}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleResponse {
    #[serde(rename = "type")]
    pub shape_type: ShapeKind,
    pub radius: f64,
    pub surface: f64,
    pub circumference: f64,
}

/// Response for `GET /api/triangle/{a}/{b}/{c}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleResponse {
    #[serde(rename = "type")]
    pub shape_type: ShapeKind,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub surface: f64,
    pub circumference: f64,
}

/// One entry of the `GET /api/history` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    pub shape_type: ShapeKind,
    pub parameters: BTreeMap<String, f64>,
    pub surface: f64,
    pub circumference: f64,
    pub calculated_at: String,
}

impl From<CalculationRecord> for HistoryEntry {
    fn from(record: CalculationRecord) -> Self {
        Self {
            id: record.id,
            shape_type: record.shape_type,
            parameters: record.parameters,
            surface: record.surface,
            circumference: record.circumference,
            calculated_at: format_timestamp(record.calculated_at),
        }
    }
}

/// Query parameters for the history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HistoryQuery {
    /// Maximum number of records to return (default 10)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Aggregate statistics payload for `GET /api/stats/{shapeType}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsPayload {
    pub shape_type: ShapeKind,
    pub avg_surface: f64,
    pub avg_circumference: f64,
    pub count: u64,
}

impl From<ShapeStats> for StatsPayload {
    fn from(stats: ShapeStats) -> Self {
        Self {
            shape_type: stats.shape_type,
            avg_surface: stats.avg_surface,
            avg_circumference: stats.avg_circumference,
            count: stats.count,
        }
    }
}

/// Stats response: either an aggregate or the explicit no-data payload.
/// A zero-count type never serializes as a zeroed aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatsResponse {
    Stats(StatsPayload),
    Empty { message: String },
}

impl StatsResponse {
    pub fn no_data() -> Self {
        Self::Empty {
            message: "No statistics available".to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Store connection status
    pub database: String,
}
