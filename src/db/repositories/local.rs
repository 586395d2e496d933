//! In-memory repository for unit testing and local development.
//!
//! Keeps the full record log in a `parking_lot::RwLock`ed vector. Ids are
//! assigned from a monotonically increasing counter and never reused, so
//! insertion order is recoverable from ids even when timestamps collide.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::super::repository::{CalculationRepository, RepositoryResult};
use crate::api::{CalculationRecord, NewCalculation, ShapeStats};
use crate::models::ShapeKind;

/// In-memory calculation history store.
#[derive(Debug)]
pub struct LocalRepository {
    records: RwLock<Vec<CalculationRecord>>,
    next_id: RwLock<i64>,
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: RwLock::new(1),
        }
    }

    /// Number of records currently stored. Test helper.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl CalculationRepository for LocalRepository {
    async fn append(&self, new: NewCalculation) -> RepositoryResult<CalculationRecord> {
        let mut next_id = self.next_id.write();
        let id = *next_id;
        *next_id += 1;

        let record = new.into_record(id);
        self.records.write().push(record.clone());
        Ok(record)
    }

    async fn query_recent(&self, limit: usize) -> RepositoryResult<Vec<CalculationRecord>> {
        let records = self.records.read();
        let mut ordered: Vec<CalculationRecord> = records.clone();
        // calculated_at descending, id descending on ties.
        ordered.sort_by(|x, y| {
            y.calculated_at
                .cmp(&x.calculated_at)
                .then_with(|| y.id.cmp(&x.id))
        });
        ordered.truncate(limit);
        Ok(ordered)
    }

    async fn query_aggregate(&self, kind: ShapeKind) -> RepositoryResult<Option<ShapeStats>> {
        let records = self.records.read();
        let matching: Vec<&CalculationRecord> =
            records.iter().filter(|r| r.shape_type == kind).collect();

        if matching.is_empty() {
            return Ok(None);
        }

        let count = matching.len() as u64;
        let sum_surface: f64 = matching.iter().map(|r| r.surface).sum();
        let sum_circumference: f64 = matching.iter().map(|r| r.circumference).sum();

        Ok(Some(ShapeStats {
            shape_type: kind,
            avg_surface: sum_surface / count as f64,
            avg_circumference: sum_circumference / count as f64,
            count,
        }))
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
