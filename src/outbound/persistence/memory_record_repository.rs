//! In-memory `RecordRepository` for deployments without a database.
//!
//! Mirrors the relational adapter's observable semantics: ids are assigned
//! monotonically and never reused, `reset` leaves the id counter alone, and
//! reads come back ordered by id.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{RecordRepository, RecordRepositoryError};
use crate::domain::{NewRecord, Record};

#[derive(Debug, Default)]
struct MemoryState {
    next_id: i32,
    rows: Vec<Record>,
}

/// Process-local record store with the same contract as the Diesel adapter.
#[derive(Debug, Default)]
pub struct MemoryRecordRepository {
    state: Mutex<MemoryState>,
}

impl MemoryRecordRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordRepository for MemoryRecordRepository {
    async fn reset(&self) -> Result<(), RecordRepositoryError> {
        self.state.lock().await.rows.clear();
        Ok(())
    }

    async fn bulk_insert(&self, rows: Vec<NewRecord>) -> Result<usize, RecordRepositoryError> {
        let mut state = self.state.lock().await;
        let inserted = rows.len();
        for row in rows {
            state.next_id += 1;
            let id = state.next_id;
            state.rows.push(Record {
                id,
                recorded_at: row.recorded_at,
                value: row.value,
            });
        }
        Ok(inserted)
    }

    async fn find_at_or_above(
        &self,
        threshold: f64,
    ) -> Result<Vec<Record>, RecordRepositoryError> {
        let state = self.state.lock().await;
        // Rows are append-only between resets, so they are already id-ordered.
        Ok(state
            .rows
            .iter()
            .filter(|record| record.value >= threshold)
            .cloned()
            .collect())
    }
}
