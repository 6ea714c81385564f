//! Tests for the dashboard refresh pipeline.

use std::sync::Arc;

use chrono::Utc;
use mockable::DefaultClock;
use mockall::Sequence;

use super::*;
use crate::domain::ports::{
    Measurement, MeasurementBatch, MockMeasurementSource, MockRecordRepository, PageInfo,
};
use crate::domain::{ErrorCode, Record};

fn make_service(
    source: MockMeasurementSource,
    records: MockRecordRepository,
) -> DashboardService<MockMeasurementSource, MockRecordRepository> {
    DashboardService::new(
        Arc::new(source),
        Arc::new(records),
        Arc::new(DefaultClock),
        DashboardPolicy::default(),
    )
}

fn sample_batch() -> MeasurementBatch {
    MeasurementBatch {
        measurements: vec![
            Measurement {
                recorded_at_utc: "2024-01-01T00:00:00Z".to_owned(),
                value: 5.0,
            },
            Measurement {
                recorded_at_utc: "2024-01-01T01:00:00Z".to_owned(),
                value: 15.0,
            },
        ],
        page_info: None,
    }
}

fn stored(id: i32, recorded_at: &str, value: f64) -> Record {
    Record {
        id,
        recorded_at: recorded_at.to_owned(),
        value,
    }
}

#[tokio::test]
async fn refresh_wipes_then_inserts_then_returns_matching_records() {
    let mut sequence = Sequence::new();
    let mut source = MockMeasurementSource::new();
    let mut records = MockRecordRepository::new();

    records
        .expect_reset()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|| Ok(()));
    source
        .expect_fetch_measurements()
        .withf(|query| query.city == "Los Angeles" && query.parameter == "pm25")
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|_| Ok(sample_batch()));
    records
        .expect_bulk_insert()
        .withf(|rows| {
            rows.len() == 2
                && rows[0].recorded_at == "2024-01-01T00:00:00Z"
                && rows[1].value == 15.0
        })
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|rows| Ok(rows.len()));
    records
        .expect_find_at_or_above()
        .withf(|threshold| *threshold == 10.0)
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|_| Ok(vec![stored(2, "2024-01-01T01:00:00Z", 15.0)]));

    let before = Utc::now();
    let outcome = make_service(source, records)
        .refresh()
        .await
        .expect("refresh succeeds");
    let after = Utc::now();

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].value, 15.0);
    assert!(outcome.refreshed_at >= before && outcome.refreshed_at <= after);
}

#[tokio::test]
async fn refresh_surfaces_provider_failure_after_the_wipe() {
    let mut source = MockMeasurementSource::new();
    let mut records = MockRecordRepository::new();

    records.expect_reset().times(1).return_once(|| Ok(()));
    source
        .expect_fetch_measurements()
        .times(1)
        .return_once(|_| Err(MeasurementSourceError::status(502, "bad gateway")));

    let error = make_service(source, records)
        .refresh()
        .await
        .expect_err("provider failure propagates");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn refresh_maps_decode_failures_to_internal_errors() {
    let mut source = MockMeasurementSource::new();
    let mut records = MockRecordRepository::new();

    records.expect_reset().times(1).return_once(|| Ok(()));
    source
        .expect_fetch_measurements()
        .times(1)
        .return_once(|_| Err(MeasurementSourceError::decode("not json")));

    let error = make_service(source, records)
        .refresh()
        .await
        .expect_err("decode failure propagates");
    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn refresh_stops_when_the_wipe_itself_fails() {
    let source = MockMeasurementSource::new();
    let mut records = MockRecordRepository::new();

    records
        .expect_reset()
        .times(1)
        .return_once(|| Err(RecordRepositoryError::connection("refused")));

    let error = make_service(source, records)
        .refresh()
        .await
        .expect_err("store failure propagates");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn refresh_with_an_empty_batch_leaves_an_empty_store() {
    let mut source = MockMeasurementSource::new();
    let mut records = MockRecordRepository::new();

    records.expect_reset().times(1).return_once(|| Ok(()));
    source
        .expect_fetch_measurements()
        .times(1)
        .return_once(|_| Ok(MeasurementBatch::default()));
    records
        .expect_bulk_insert()
        .withf(Vec::is_empty)
        .times(1)
        .return_once(|_| Ok(0));
    records
        .expect_find_at_or_above()
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let outcome = make_service(source, records)
        .refresh()
        .await
        .expect("empty refresh succeeds");
    assert!(outcome.records.is_empty());
}

#[tokio::test]
async fn refresh_tolerates_pagination_metadata() {
    let mut source = MockMeasurementSource::new();
    let mut records = MockRecordRepository::new();

    records.expect_reset().times(1).return_once(|| Ok(()));
    source.expect_fetch_measurements().times(1).return_once(|_| {
        Ok(MeasurementBatch {
            measurements: sample_batch().measurements,
            page_info: Some(PageInfo {
                found: 250,
                limit: 100,
                pages: 3,
            }),
        })
    });
    records
        .expect_bulk_insert()
        .times(1)
        .return_once(|rows| Ok(rows.len()));
    records
        .expect_find_at_or_above()
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    make_service(source, records)
        .refresh()
        .await
        .expect("refresh succeeds");
}

#[tokio::test]
async fn refresh_over_the_fixture_ports_yields_an_empty_outcome() {
    use crate::domain::ports::{FixtureMeasurementSource, FixtureRecordRepository};

    let service = DashboardService::new(
        Arc::new(FixtureMeasurementSource),
        Arc::new(FixtureRecordRepository),
        Arc::new(DefaultClock),
        DashboardPolicy::default(),
    );

    let outcome = service.refresh().await.expect("fixture refresh succeeds");
    assert!(outcome.records.is_empty());
    assert!(service.list().await.expect("fixture list succeeds").is_empty());
}

#[tokio::test]
async fn reset_delegates_to_the_store() {
    let source = MockMeasurementSource::new();
    let mut records = MockRecordRepository::new();

    records.expect_reset().times(1).return_once(|| Ok(()));

    make_service(source, records)
        .reset()
        .await
        .expect("reset succeeds");
}

#[tokio::test]
async fn list_reads_without_fetching() {
    let source = MockMeasurementSource::new();
    let mut records = MockRecordRepository::new();

    records
        .expect_find_at_or_above()
        .withf(|threshold| *threshold == 10.0)
        .times(1)
        .return_once(|_| Ok(vec![stored(1, "2024-01-01T00:00:00Z", 12.5)]));

    let listed = make_service(source, records)
        .list()
        .await
        .expect("list succeeds");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].value, 12.5);
}

#[tokio::test]
async fn list_maps_query_failures_to_internal_errors() {
    let source = MockMeasurementSource::new();
    let mut records = MockRecordRepository::new();

    records
        .expect_find_at_or_above()
        .times(1)
        .return_once(|_| Err(RecordRepositoryError::query("syntax error")));

    let error = make_service(source, records)
        .list()
        .await
        .expect_err("query failure propagates");
    assert_eq!(error.code(), ErrorCode::InternalError);
}
