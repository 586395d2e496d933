//! Geometry calculation service.
//!
//! The single write path into the history store: every successful
//! `compute_and_record` call persists exactly one record. Validation runs
//! before any formula is evaluated; a failed validation writes nothing.

use std::sync::Arc;

use chrono::Utc;

use crate::api::{CalculationRecord, NewCalculation, ShapeStats};
use crate::db::repository::{CalculationRepository, RepositoryError};
use crate::models::validation::{is_positive, satisfies_triangle_inequality};
use crate::models::{Circle, Shape, ShapeKind, Triangle};

/// Default number of records returned by [`GeometryCalculator::recent_calculations`].
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Errors produced by the calculation service.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    /// Input failed a well-formedness check. Nothing was persisted.
    #[error("{reason}")]
    Validation { reason: String },

    /// The history store failed.
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

impl GeometryError {
    fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

/// Service that validates inputs, evaluates shape formulas, and records
/// each computation in the history store.
///
/// The repository is an explicit collaborator supplied at construction.
pub struct GeometryCalculator {
    repository: Arc<dyn CalculationRepository>,
}

impl GeometryCalculator {
    pub fn new(repository: Arc<dyn CalculationRepository>) -> Self {
        Self { repository }
    }

    /// Validate a radius and build the circle.
    pub fn circle(radius: f64) -> Result<Circle, GeometryError> {
        if !is_positive(radius) {
            return Err(GeometryError::validation("radius must be positive"));
        }
        Ok(Circle::new(radius))
    }

    /// Validate three side lengths and build the triangle.
    pub fn triangle(a: f64, b: f64, c: f64) -> Result<Triangle, GeometryError> {
        if ![a, b, c].into_iter().all(is_positive) {
            return Err(GeometryError::validation(
                "triangle sides must be positive",
            ));
        }
        if !satisfies_triangle_inequality(a, b, c) {
            return Err(GeometryError::validation("triangle inequality violated"));
        }
        Ok(Triangle::new(a, b, c))
    }

    /// Compute surface and circumference for a validated shape and persist
    /// the result as a new history record.
    pub async fn record(&self, shape: &dyn Shape) -> Result<CalculationRecord, GeometryError> {
        let new = NewCalculation {
            shape_type: shape.kind(),
            parameters: shape.parameters(),
            surface: shape.surface(),
            circumference: shape.circumference(),
            calculated_at: Utc::now(),
        };
        Ok(self.repository.append(new).await?)
    }

    /// Validate raw parameters, compute, and persist in one step.
    ///
    /// `params` carries the raw inputs for `kind`: `[radius]` for a circle,
    /// `[a, b, c]` for a triangle. Validation failures name the violated
    /// rule and leave the store untouched.
    pub async fn compute_and_record(
        &self,
        kind: ShapeKind,
        params: &[f64],
    ) -> Result<CalculationRecord, GeometryError> {
        match kind {
            ShapeKind::Circle => {
                let [radius] = params else {
                    return Err(GeometryError::validation(
                        "circle requires exactly one parameter (radius)",
                    ));
                };
                let circle = Self::circle(*radius)?;
                self.record(&circle).await
            }
            ShapeKind::Triangle => {
                let [a, b, c] = params else {
                    return Err(GeometryError::validation(
                        "triangle requires exactly three parameters (a, b, c)",
                    ));
                };
                let triangle = Self::triangle(*a, *b, *c)?;
                self.record(&triangle).await
            }
        }
    }

    /// Most recent `limit` records, newest first.
    pub async fn recent_calculations(
        &self,
        limit: usize,
    ) -> Result<Vec<CalculationRecord>, GeometryError> {
        Ok(self.repository.query_recent(limit).await?)
    }

    /// Aggregate statistics over all records of `kind`, or `None` when no
    /// records of that kind exist.
    pub async fn statistics_for(
        &self,
        kind: ShapeKind,
    ) -> Result<Option<ShapeStats>, GeometryError> {
        Ok(self.repository.query_aggregate(kind).await?)
    }

    /// Whether the backing store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.repository.health_check().await.unwrap_or(false)
    }

    /// Sum of the areas of two shapes. Pure, no persistence.
    pub fn sum_surfaces(a: &dyn Shape, b: &dyn Shape) -> f64 {
        a.surface() + b.surface()
    }

    /// Sum of the perimeters of two shapes. Pure, no persistence.
    pub fn sum_circumferences(a: &dyn Shape, b: &dyn Shape) -> f64 {
        a.circumference() + b.circumference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;

    fn calculator() -> (Arc<LocalRepository>, GeometryCalculator) {
        let repo = Arc::new(LocalRepository::new());
        let calc = GeometryCalculator::new(repo.clone());
        (repo, calc)
    }

    #[tokio::test]
    async fn records_circle_calculation() {
        let (_repo, calc) = calculator();
        let record = calc
            .compute_and_record(ShapeKind::Circle, &[2.0])
            .await
            .unwrap();

        assert_eq!(record.shape_type, ShapeKind::Circle);
        assert!((record.surface - 12.566).abs() < 1e-3);
        assert!((record.circumference - 12.566).abs() < 1e-3);
        assert_eq!(record.parameters.get("radius"), Some(&2.0));
    }

    #[tokio::test]
    async fn negative_radius_is_rejected_and_nothing_stored() {
        let (repo, calc) = calculator();
        let err = calc
            .compute_and_record(ShapeKind::Circle, &[-1.0])
            .await
            .unwrap_err();

        assert!(matches!(err, GeometryError::Validation { .. }));
        assert_eq!(err.to_string(), "radius must be positive");
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn degenerate_triangle_is_rejected_and_nothing_stored() {
        let (repo, calc) = calculator();
        let err = calc
            .compute_and_record(ShapeKind::Triangle, &[1.0, 1.0, 2.0])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "triangle inequality violated");
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn negative_side_is_reported_as_positivity_failure() {
        let (repo, calc) = calculator();
        let err = calc
            .compute_and_record(ShapeKind::Triangle, &[-3.0, 4.0, 5.0])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "triangle sides must be positive");
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn wrong_parameter_count_is_a_validation_error() {
        let (repo, calc) = calculator();
        let err = calc
            .compute_and_record(ShapeKind::Circle, &[1.0, 2.0])
            .await
            .unwrap_err();
        assert!(matches!(err, GeometryError::Validation { .. }));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn valid_triangle_is_recorded() {
        let (repo, calc) = calculator();
        let record = calc
            .compute_and_record(ShapeKind::Triangle, &[3.0, 4.0, 5.0])
            .await
            .unwrap();

        assert_eq!(record.shape_type, ShapeKind::Triangle);
        assert!((record.surface - 6.0).abs() < 1e-9);
        assert_eq!(record.circumference, 12.0);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn recent_returns_at_most_limit_newest_first() {
        let (_repo, calc) = calculator();
        for radius in [1.0, 2.0, 3.0] {
            calc.compute_and_record(ShapeKind::Circle, &[radius])
                .await
                .unwrap();
        }

        let recent = calc.recent_calculations(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].parameters.get("radius"), Some(&3.0));
        assert_eq!(recent[1].parameters.get("radius"), Some(&2.0));
    }

    #[tokio::test]
    async fn recent_after_single_circle_returns_that_record() {
        let (_repo, calc) = calculator();
        calc.compute_and_record(ShapeKind::Circle, &[2.0])
            .await
            .unwrap();

        let recent = calc.recent_calculations(1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert!((recent[0].surface - 12.566).abs() < 1e-3);
        assert!((recent[0].circumference - 12.566).abs() < 1e-3);
    }

    #[tokio::test]
    async fn statistics_on_empty_store_is_none_not_zeroes() {
        let (_repo, calc) = calculator();
        let stats = calc.statistics_for(ShapeKind::Triangle).await.unwrap();
        assert!(stats.is_none());
    }

    #[tokio::test]
    async fn statistics_average_over_matching_kind_only() {
        let (_repo, calc) = calculator();
        calc.compute_and_record(ShapeKind::Circle, &[1.0])
            .await
            .unwrap();
        calc.compute_and_record(ShapeKind::Triangle, &[3.0, 4.0, 5.0])
            .await
            .unwrap();
        calc.compute_and_record(ShapeKind::Triangle, &[6.0, 8.0, 10.0])
            .await
            .unwrap();

        let stats = calc
            .statistics_for(ShapeKind::Triangle)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stats.count, 2);
        assert!((stats.avg_circumference - 18.0).abs() < 1e-9);
        // areas 6 and 24
        assert!((stats.avg_surface - 15.0).abs() < 1e-9);
    }

    #[test]
    fn sum_combinators_are_pure() {
        let circle = Circle::new(1.0);
        let triangle = Triangle::new(3.0, 4.0, 5.0);

        let surfaces = GeometryCalculator::sum_surfaces(&circle, &triangle);
        assert!((surfaces - (std::f64::consts::PI + 6.0)).abs() < 1e-9);

        let circumferences = GeometryCalculator::sum_circumferences(&circle, &triangle);
        assert!((circumferences - (2.0 * std::f64::consts::PI + 12.0)).abs() < 1e-9);
    }
}
