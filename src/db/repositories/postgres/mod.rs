//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Connection validation on checkout
//! - Schema bootstrap at startup
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)

use std::time::Duration;

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use tokio::task;

use crate::api::{CalculationRecord, NewCalculation, ShapeStats};
use crate::db::repository::{
    CalculationRepository, ErrorContext, RepositoryError, RepositoryResult,
};
use crate::models::ShapeKind;

mod models;
mod schema;

use models::{CalculationRow, NewCalculationRow};
use schema::shape_calculations::dsl as calc_dsl;

type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let max_pool_size = std::env::var("PG_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let min_pool_size = std::env::var("PG_POOL_MIN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1);

        let connection_timeout_sec = std::env::var("PG_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let idle_timeout_sec = std::env::var("PG_IDLE_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        Ok(Self {
            database_url,
            max_pool_size,
            min_pool_size,
            connection_timeout_sec,
            idle_timeout_sec,
        })
    }
}

/// Diesel-backed repository for Postgres.
#[derive(Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Create a new repository and ensure the schema exists.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| RepositoryError::ConnectionError {
                message: e.to_string(),
                context: ErrorContext::new("create_pool")
                    .with_details(format!("max_size={}", config.max_pool_size))
                    .retryable(),
            })?;

        {
            let mut conn = pool.get().map_err(RepositoryError::from)?;
            Self::ensure_schema(&mut conn)?;
        }

        Ok(Self { pool })
    }

    /// Bootstrap the history table. The schema is a single append-only
    /// table, so this replaces a migration framework.
    fn ensure_schema(conn: &mut PgConnection) -> RepositoryResult<()> {
        sql_query(
            "CREATE TABLE IF NOT EXISTS shape_calculations (
                id BIGSERIAL PRIMARY KEY,
                shape_type TEXT NOT NULL,
                parameters JSONB NOT NULL,
                surface DOUBLE PRECISION NOT NULL,
                circumference DOUBLE PRECISION NOT NULL,
                calculated_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(conn)
        .map_err(|e| RepositoryError::from(e).with_operation("ensure_schema"))?;
        Ok(())
    }

    /// Run a blocking Diesel operation on a pooled connection.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(RepositoryError::from)?;
            f(&mut conn)
        })
        .await
        .map_err(|e| {
            RepositoryError::internal(format!("Blocking task failed: {}", e))
                .with_operation(operation)
        })?
        .map_err(|e| e.with_operation(operation))
    }
}

#[async_trait]
impl CalculationRepository for PostgresRepository {
    async fn append(&self, new: NewCalculation) -> RepositoryResult<CalculationRecord> {
        let row = NewCalculationRow::from(new);
        let inserted: CalculationRow = self
            .with_conn("append", move |conn| {
                diesel::insert_into(calc_dsl::shape_calculations)
                    .values(&row)
                    .get_result(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        inserted.try_into()
    }

    async fn query_recent(&self, limit: usize) -> RepositoryResult<Vec<CalculationRecord>> {
        let rows: Vec<CalculationRow> = self
            .with_conn("query_recent", move |conn| {
                calc_dsl::shape_calculations
                    .order((calc_dsl::calculated_at.desc(), calc_dsl::id.desc()))
                    .limit(i64::try_from(limit).unwrap_or(i64::MAX))
                    .load(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn query_aggregate(&self, kind: ShapeKind) -> RepositoryResult<Option<ShapeStats>> {
        // Fresh scan over the type-filtered set; no cached aggregate.
        let rows: Vec<CalculationRow> = self
            .with_conn("query_aggregate", move |conn| {
                calc_dsl::shape_calculations
                    .filter(calc_dsl::shape_type.eq(kind.to_string()))
                    .load(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        let count = rows.len() as u64;
        let sum_surface: f64 = rows.iter().map(|r| r.surface).sum();
        let sum_circumference: f64 = rows.iter().map(|r| r.circumference).sum();

        Ok(Some(ShapeStats {
            shape_type: kind,
            avg_surface: sum_surface / count as f64,
            avg_circumference: sum_circumference / count as f64,
            count,
        }))
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map_err(RepositoryError::from)
        })
        .await?;
        Ok(true)
    }
}
