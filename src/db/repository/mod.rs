//! Repository trait for the calculation history store.
//!
//! The store is an append-only log of [`CalculationRecord`]s plus a derived
//! per-type aggregate query. The calculation service is the only writer;
//! readers never mutate records.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::{CalculationRecord, NewCalculation, ShapeStats};
use crate::models::ShapeKind;

/// Repository trait for calculation history operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait CalculationRepository: Send + Sync {
    /// Persist a new calculation, assigning its identifier.
    ///
    /// On success the record is durably visible to subsequent reads.
    /// Failures surface as `RepositoryError`; there is no partial state (an
    /// append either fully succeeds or the record does not exist).
    async fn append(&self, new: NewCalculation) -> RepositoryResult<CalculationRecord>;

    /// Fetch the most recent `limit` records, ordered by `calculated_at`
    /// descending with ties broken by id descending (newest insertion
    /// first). Never returns more than `limit` records.
    async fn query_recent(&self, limit: usize) -> RepositoryResult<Vec<CalculationRecord>>;

    /// Aggregate all records of `kind` at call time. Recomputed from a
    /// fresh scan on every call; `Ok(None)` when no records match.
    async fn query_aggregate(&self, kind: ShapeKind) -> RepositoryResult<Option<ShapeStats>>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
