//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::CalculationRepository;
use crate::services::GeometryCalculator;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Calculation service over the configured repository.
    pub calculator: Arc<GeometryCalculator>,
}

impl AppState {
    /// Create application state around the given repository.
    pub fn new(repository: Arc<dyn CalculationRepository>) -> Self {
        Self {
            calculator: Arc::new(GeometryCalculator::new(repository)),
        }
    }
}
