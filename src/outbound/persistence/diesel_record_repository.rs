//! PostgreSQL-backed `RecordRepository` implementation using Diesel.
//!
//! This adapter implements the domain's `RecordRepository` port. Every
//! refresh rewrites the whole table, so the operations stay deliberately
//! coarse: delete-all, multi-row insert, one filtered select.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{RecordRepository, RecordRepositoryError};
use crate::domain::{NewRecord, Record};

use super::models::{NewRecordRow, RecordRow};
use super::pool::{DbPool, PoolError};
use super::schema::records;

/// Diesel-backed implementation of the `RecordRepository` port.
#[derive(Clone)]
pub struct DieselRecordRepository {
    pool: DbPool,
}

impl DieselRecordRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain record repository errors.
fn map_pool_error(error: PoolError) -> RecordRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RecordRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain record repository errors.
fn map_diesel_error(error: diesel::result::Error, operation: &str) -> RecordRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, operation, "diesel operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RecordRepositoryError::connection("database connection error")
        }
        other => RecordRepositoryError::query(other.to_string()),
    }
}

fn row_to_record(row: RecordRow) -> Record {
    Record {
        id: row.id,
        recorded_at: row.recorded_at,
        value: row.value,
    }
}

#[async_trait]
impl RecordRepository for DieselRecordRepository {
    async fn reset(&self) -> Result<(), RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(records::table)
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "reset"))?;
        Ok(())
    }

    async fn bulk_insert(&self, rows: Vec<NewRecord>) -> Result<usize, RecordRepositoryError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_rows: Vec<NewRecordRow<'_>> = rows
            .iter()
            .map(|row| NewRecordRow {
                recorded_at: &row.recorded_at,
                value: row.value,
            })
            .collect();
        diesel::insert_into(records::table)
            .values(&new_rows)
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "bulk_insert"))
    }

    async fn find_at_or_above(
        &self,
        threshold: f64,
    ) -> Result<Vec<Record>, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RecordRow> = records::table
            .filter(records::value.ge(threshold))
            .order(records::id.asc())
            .select(RecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "find_at_or_above"))?;
        Ok(rows.into_iter().map(row_to_record).collect())
    }
}
