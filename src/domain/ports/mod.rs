//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`MeasurementSource`, `RecordRepository`) are implemented by
//! outbound adapters; driving ports (`DashboardCommand`, `DashboardQuery`)
//! are implemented by the domain service and consumed by inbound adapters.

mod dashboard_command;
mod dashboard_query;
mod measurement_source;
mod record_repository;

#[cfg(test)]
pub use dashboard_command::MockDashboardCommand;
pub use dashboard_command::{DashboardCommand, RefreshOutcome};
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::DashboardQuery;
#[cfg(test)]
pub use measurement_source::MockMeasurementSource;
pub use measurement_source::{
    FixtureMeasurementSource, Measurement, MeasurementBatch, MeasurementQuery, MeasurementSource,
    MeasurementSourceError, PageInfo,
};
#[cfg(test)]
pub use record_repository::MockRecordRepository;
pub use record_repository::{FixtureRecordRepository, RecordRepository, RecordRepositoryError};
