//! Driven port for fetching measurements from the air-quality provider.
//!
//! The domain owns the query shape and response contract so the refresh
//! pipeline stays adapter-agnostic.

use async_trait::async_trait;

/// Filters bound into a provider measurements request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementQuery {
    /// City the measurements were collected in.
    pub city: String,
    /// Pollutant parameter, e.g. `pm25`.
    pub parameter: String,
}

/// One measurement row returned by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// UTC collection time exactly as the provider sent it.
    pub recorded_at_utc: String,
    /// Pollutant concentration, passed through uninterpreted.
    pub value: f64,
}

/// Pagination metadata derived from the provider's response `meta` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Total number of matching rows the provider reported.
    pub found: u64,
    /// Page size the provider applied.
    pub limit: u64,
    /// Number of pages implied by `found` and `limit`.
    pub pages: u64,
}

/// First page of measurements plus optional pagination metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeasurementBatch {
    /// Measurement rows in provider order.
    pub measurements: Vec<Measurement>,
    /// Present only when the provider reported both a total and a non-zero
    /// page size.
    pub page_info: Option<PageInfo>,
}

/// Errors surfaced while calling the measurement provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeasurementSourceError {
    /// Network transport failed before receiving a response.
    #[error("provider transport failed: {message}")]
    Transport {
        /// Transport failure description.
        message: String,
    },
    /// Provider call exceeded the configured timeout.
    #[error("provider timeout: {message}")]
    Timeout {
        /// Timeout description.
        message: String,
    },
    /// Provider rate-limited the request.
    #[error("provider rate limited request: {message}")]
    RateLimited {
        /// Rate-limit description.
        message: String,
    },
    /// Provider answered with a non-success status.
    #[error("provider returned status {status}: {message}")]
    Status {
        /// HTTP status code the provider answered with.
        status: u16,
        /// Response body preview.
        message: String,
    },
    /// Provider response could not be decoded.
    #[error("provider response decode failed: {message}")]
    Decode {
        /// Decode failure description.
        message: String,
    },
}

impl MeasurementSourceError {
    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a timeout error with the given message.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create a rate-limited error with the given message.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Create a status error for a non-success response.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error with the given message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for fetching the first page of measurements for a city/parameter
/// pair.
///
/// Implementations issue exactly one request; pagination is never traversed
/// and responses are never cached.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeasurementSource: Send + Sync {
    /// Fetch the first page of measurements matching `query`.
    async fn fetch_measurements(
        &self,
        query: &MeasurementQuery,
    ) -> Result<MeasurementBatch, MeasurementSourceError>;
}

/// Fixture implementation returning an empty batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureMeasurementSource;

#[async_trait]
impl MeasurementSource for FixtureMeasurementSource {
    async fn fetch_measurements(
        &self,
        _query: &MeasurementQuery,
    ) -> Result<MeasurementBatch, MeasurementSourceError> {
        Ok(MeasurementBatch::default())
    }
}
