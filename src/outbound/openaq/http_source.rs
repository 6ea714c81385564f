//! Reqwest-backed OpenAQ source adapter.
//!
//! This adapter owns transport details only: query-string construction,
//! timeout and HTTP error mapping, and JSON decoding into domain rows.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::MeasurementsResponseDto;
use crate::domain::ports::{
    MeasurementBatch, MeasurementQuery, MeasurementSource, MeasurementSourceError,
};

const API_VERSION: &str = "v1";

/// OpenAQ source adapter issuing GET requests against one endpoint.
pub struct OpenAqHttpSource {
    client: Client,
    base_url: Url,
}

impl OpenAqHttpSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn measurements_url(
        &self,
        query: &MeasurementQuery,
    ) -> Result<Url, MeasurementSourceError> {
        let mut url = self
            .base_url
            .join(&format!("{API_VERSION}/measurements"))
            .map_err(|error| {
                MeasurementSourceError::transport(format!("invalid provider url: {error}"))
            })?;
        url.query_pairs_mut()
            .append_pair("city", &query.city)
            .append_pair("parameter", &query.parameter);
        Ok(url)
    }
}

#[async_trait]
impl MeasurementSource for OpenAqHttpSource {
    async fn fetch_measurements(
        &self,
        query: &MeasurementQuery,
    ) -> Result<MeasurementBatch, MeasurementSourceError> {
        let url = self.measurements_url(query)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_batch(body.as_ref())
    }
}

fn parse_batch(body: &[u8]) -> Result<MeasurementBatch, MeasurementSourceError> {
    let decoded: MeasurementsResponseDto = serde_json::from_slice(body).map_err(|error| {
        MeasurementSourceError::decode(format!("invalid OpenAQ JSON payload: {error}"))
    })?;
    Ok(decoded.into_batch())
}

fn map_transport_error(error: reqwest::Error) -> MeasurementSourceError {
    if error.is_timeout() {
        MeasurementSourceError::timeout(error.to_string())
    } else {
        MeasurementSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MeasurementSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        preview
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => MeasurementSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            MeasurementSourceError::timeout(message)
        }
        _ => MeasurementSourceError::status(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
