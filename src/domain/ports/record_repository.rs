//! Driven port for record persistence.

use async_trait::async_trait;

use crate::domain::{NewRecord, Record};

/// Errors raised by record repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordRepositoryError {
    /// Repository connection could not be established.
    #[error("record repository connection failed: {message}")]
    Connection {
        /// Connection failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("record repository query failed: {message}")]
    Query {
        /// Query failure description.
        message: String,
    },
}

impl RecordRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for the single-table record store.
///
/// The store holds either nothing or exactly the latest full pull from the
/// provider; rows are never updated in place.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Remove every stored record.
    ///
    /// Idempotent; safe to call when the store is already empty.
    async fn reset(&self) -> Result<(), RecordRepositoryError>;

    /// Append one record per input row, assigning fresh ids.
    ///
    /// The insert is a single logical unit: a failure surfaces an error and
    /// never silently drops rows. Inserting zero rows succeeds and returns 0.
    async fn bulk_insert(&self, rows: Vec<NewRecord>) -> Result<usize, RecordRepositoryError>;

    /// Return records with `value >= threshold`, ordered by id ascending.
    async fn find_at_or_above(&self, threshold: f64)
    -> Result<Vec<Record>, RecordRepositoryError>;
}

/// Fixture implementation that discards writes and returns empty results.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureRecordRepository;

#[async_trait]
impl RecordRepository for FixtureRecordRepository {
    async fn reset(&self) -> Result<(), RecordRepositoryError> {
        Ok(())
    }

    async fn bulk_insert(&self, rows: Vec<NewRecord>) -> Result<usize, RecordRepositoryError> {
        Ok(rows.len())
    }

    async fn find_at_or_above(
        &self,
        _threshold: f64,
    ) -> Result<Vec<Record>, RecordRepositoryError> {
        Ok(Vec::new())
    }
}
