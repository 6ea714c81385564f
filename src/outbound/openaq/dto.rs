//! Serde DTOs for the OpenAQ v1 measurements resource.
//!
//! Only the fields the dashboard consumes are modelled; unknown fields are
//! tolerated. Conversion into domain types happens here so the transport
//! module stays free of mapping rules.

use serde::Deserialize;

use crate::domain::ports::{Measurement, MeasurementBatch, PageInfo};

/// Top-level measurements response.
#[derive(Debug, Deserialize)]
pub(super) struct MeasurementsResponseDto {
    #[serde(default)]
    pub meta: Option<MetaDto>,
    pub results: Vec<MeasurementRowDto>,
}

/// Response `meta` block; `found` and `limit` drive the derived page count.
#[derive(Debug, Deserialize)]
pub(super) struct MetaDto {
    #[serde(default)]
    pub found: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

/// One measurement row.
#[derive(Debug, Deserialize)]
pub(super) struct MeasurementRowDto {
    pub date: MeasurementDateDto,
    pub value: f64,
}

/// Collection-time block carried on every row.
#[derive(Debug, Deserialize)]
pub(super) struct MeasurementDateDto {
    pub utc: String,
}

impl MetaDto {
    /// Derive the page count when the provider reported both totals.
    ///
    /// A missing field or a zero page size yields `None`; neither is an
    /// error.
    fn page_info(&self) -> Option<PageInfo> {
        match (self.found, self.limit) {
            (Some(found), Some(limit)) if limit > 0 => Some(PageInfo {
                found,
                limit,
                pages: found.div_ceil(limit),
            }),
            _ => None,
        }
    }
}

impl MeasurementsResponseDto {
    /// Flatten the response into the domain batch shape.
    pub(super) fn into_batch(self) -> MeasurementBatch {
        let page_info = self.meta.as_ref().and_then(MetaDto::page_info);
        let measurements = self
            .results
            .into_iter()
            .map(|row| Measurement {
                recorded_at_utc: row.date.utc,
                value: row.value,
            })
            .collect();
        MeasurementBatch {
            measurements,
            page_info,
        }
    }
}
