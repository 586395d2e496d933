//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! calculation service for business logic.

use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use super::dto::{
    CircleResponse, HealthResponse, HistoryEntry, HistoryQuery, StatsResponse, TriangleResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::ShapeKind;
use crate::services::calculator::DEFAULT_HISTORY_LIMIT;
use crate::services::GeometryCalculator;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let database = if state.calculator.store_healthy().await {
        "connected".to_string()
    } else {
        "disconnected".to_string()
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database,
    }))
}

/// GET /api/circle/{radius}
///
/// Compute surface and circumference of a circle and record the
/// calculation. Non-positive radii are rejected with 400.
pub async fn get_circle(
    State(state): State<AppState>,
    Path(radius): Path<f64>,
) -> HandlerResult<CircleResponse> {
    let circle = GeometryCalculator::circle(radius)?;
    let record = state.calculator.record(&circle).await?;
    debug!(radius, surface = record.surface, "recorded circle calculation");

    Ok(Json(CircleResponse {
        shape_type: ShapeKind::Circle,
        radius,
        surface: record.surface,
        circumference: record.circumference,
    }))
}

/// GET /api/triangle/{a}/{b}/{c}
///
/// Compute surface and circumference of a triangle and record the
/// calculation. Non-positive sides and degenerate triangles are rejected
/// with 400.
pub async fn get_triangle(
    State(state): State<AppState>,
    Path((a, b, c)): Path<(f64, f64, f64)>,
) -> HandlerResult<TriangleResponse> {
    let triangle = GeometryCalculator::triangle(a, b, c)?;
    let record = state.calculator.record(&triangle).await?;
    debug!(a, b, c, surface = record.surface, "recorded triangle calculation");

    Ok(Json(TriangleResponse {
        shape_type: ShapeKind::Triangle,
        a,
        b,
        c,
        surface: record.surface,
        circumference: record.circumference,
    }))
}

/// GET /api/history?limit=N
///
/// Most recent calculations, newest first. Defaults to 10.
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> HandlerResult<Vec<HistoryEntry>> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let records = state.calculator.recent_calculations(limit).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// GET /api/stats/{shapeType}
///
/// Aggregate statistics for one shape type. An unknown shape type or a
/// type with no records yields the explicit no-data payload.
pub async fn get_stats(
    State(state): State<AppState>,
    Path(shape_type): Path<String>,
) -> HandlerResult<StatsResponse> {
    let Ok(kind) = ShapeKind::from_str(&shape_type) else {
        return Ok(Json(StatsResponse::no_data()));
    };

    let response = match state.calculator.statistics_for(kind).await? {
        Some(stats) => StatsResponse::Stats(stats.into()),
        None => StatsResponse::no_data(),
    };
    Ok(Json(response))
}
