//! Driving port for dashboard mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, Record};

/// Result of a completed refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    /// Wall-clock completion time of the refresh.
    pub refreshed_at: DateTime<Utc>,
    /// Records at or above the display threshold after the refresh.
    pub records: Vec<Record>,
}

/// Port for operations that mutate the record store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardCommand: Send + Sync {
    /// Replace the store contents with a fresh provider pull.
    ///
    /// On failure the store is left empty, never half-written.
    async fn refresh(&self) -> Result<RefreshOutcome, Error>;

    /// Wipe the store without fetching replacement data.
    async fn reset(&self) -> Result<(), Error>;
}
