//! # Geometry Calculation Backend
//!
//! Rust backend for the geometry calculator. It computes area ("surface")
//! and perimeter ("circumference") for circles and triangles, persists every
//! computation as an immutable history record, and serves aggregate
//! statistics per shape type. The backend exposes a REST API via Axum for
//! the dashboard frontend.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) shared across layers
//! - [`models`]: Pure shape formulas and input validation
//! - [`services`]: Calculation service (validate, compute, persist, aggregate)
//! - [`db`]: Repository pattern and persistence backends
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;

pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
