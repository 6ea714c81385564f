//! Driving port for dashboard reads.

use async_trait::async_trait;

use crate::domain::{Error, Record};

/// Port for reading currently stored records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Return records at or above the display threshold.
    ///
    /// Pure read; never triggers a refresh.
    async fn list(&self) -> Result<Vec<Record>, Error>;
}
