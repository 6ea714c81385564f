//! Dashboard domain service orchestrating the refresh pipeline.
//!
//! `refresh` is the only path that repopulates the store: it wipes existing
//! rows, pulls the first page of provider measurements, and inserts one
//! record per row. A provider failure after the wipe leaves the store empty
//! and surfaces the error; stale data is never presented as a fresh result.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::ports::{
    DashboardCommand, DashboardQuery, MeasurementQuery, MeasurementSource,
    MeasurementSourceError, RecordRepository, RecordRepositoryError, RefreshOutcome,
};
use crate::domain::{Error, NewRecord, Record};

/// Fixed provider filters and display threshold for one deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPolicy {
    /// City filter bound into every provider request.
    pub city: String,
    /// Pollutant parameter filter.
    pub parameter: String,
    /// Minimum value a record must reach to be displayed.
    pub threshold: f64,
}

impl Default for DashboardPolicy {
    fn default() -> Self {
        Self {
            city: "Los Angeles".to_owned(),
            parameter: "pm25".to_owned(),
            threshold: 10.0,
        }
    }
}

/// Domain service implementing the dashboard driving ports.
pub struct DashboardService<S, R> {
    source: Arc<S>,
    records: Arc<R>,
    clock: Arc<dyn Clock>,
    policy: DashboardPolicy,
    // Serialises the wipe-to-insert window so concurrent refreshes cannot
    // interleave and expose a half-written store.
    refresh_guard: Mutex<()>,
}

impl<S, R> DashboardService<S, R> {
    /// Create a new service over a measurement source and record store.
    pub fn new(
        source: Arc<S>,
        records: Arc<R>,
        clock: Arc<dyn Clock>,
        policy: DashboardPolicy,
    ) -> Self {
        Self {
            source,
            records,
            clock,
            policy,
            refresh_guard: Mutex::new(()),
        }
    }
}

impl<S, R> DashboardService<S, R>
where
    S: MeasurementSource,
    R: RecordRepository,
{
    fn map_source_error(error: MeasurementSourceError) -> Error {
        match error {
            MeasurementSourceError::Transport { .. }
            | MeasurementSourceError::Timeout { .. }
            | MeasurementSourceError::RateLimited { .. }
            | MeasurementSourceError::Status { .. } => {
                Error::service_unavailable(format!("measurement provider unavailable: {error}"))
            }
            MeasurementSourceError::Decode { .. } => {
                Error::internal(format!("measurement provider error: {error}"))
            }
        }
    }

    fn map_store_error(error: RecordRepositoryError) -> Error {
        match error {
            RecordRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("record store unavailable: {message}"))
            }
            RecordRepositoryError::Query { message } => {
                Error::internal(format!("record store error: {message}"))
            }
        }
    }

    async fn matching_records(&self) -> Result<Vec<Record>, Error> {
        self.records
            .find_at_or_above(self.policy.threshold)
            .await
            .map_err(Self::map_store_error)
    }
}

#[async_trait]
impl<S, R> DashboardCommand for DashboardService<S, R>
where
    S: MeasurementSource,
    R: RecordRepository,
{
    async fn refresh(&self) -> Result<RefreshOutcome, Error> {
        let _guard = self.refresh_guard.lock().await;

        self.records.reset().await.map_err(Self::map_store_error)?;

        let query = MeasurementQuery {
            city: self.policy.city.clone(),
            parameter: self.policy.parameter.clone(),
        };
        let batch = self
            .source
            .fetch_measurements(&query)
            .await
            .map_err(Self::map_source_error)?;
        if let Some(page_info) = batch.page_info {
            debug!(
                found = page_info.found,
                limit = page_info.limit,
                pages = page_info.pages,
                "fetched first of several result pages"
            );
        }

        let rows: Vec<NewRecord> = batch
            .measurements
            .into_iter()
            .map(|measurement| NewRecord {
                recorded_at: measurement.recorded_at_utc,
                value: measurement.value,
            })
            .collect();
        let inserted = self
            .records
            .bulk_insert(rows)
            .await
            .map_err(Self::map_store_error)?;
        let refreshed_at = self.clock.utc();
        info!(
            inserted,
            city = %self.policy.city,
            parameter = %self.policy.parameter,
            "store repopulated from provider"
        );

        let records = self.matching_records().await?;
        Ok(RefreshOutcome {
            refreshed_at,
            records,
        })
    }

    async fn reset(&self) -> Result<(), Error> {
        let _guard = self.refresh_guard.lock().await;
        self.records.reset().await.map_err(Self::map_store_error)?;
        info!("store emptied");
        Ok(())
    }
}

#[async_trait]
impl<S, R> DashboardQuery for DashboardService<S, R>
where
    S: MeasurementSource,
    R: RecordRepository,
{
    async fn list(&self) -> Result<Vec<Record>, Error> {
        self.matching_records().await
    }
}

#[cfg(test)]
#[path = "dashboard_service_tests.rs"]
mod tests;
