//! Dashboard HTTP handlers.
//!
//! ```text
//! GET /         -> current high-pollution records
//! GET /refresh  -> wipe-and-repopulate, then the same view
//! GET /resetDB  -> wipe only
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Serialize;

use crate::domain::Record;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// One record as rendered to dashboard clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDto {
    /// Store-assigned identifier.
    pub id: i32,
    /// UTC collection time as provider text.
    pub recorded_at: String,
    /// Pollutant concentration.
    pub value: f64,
}

impl From<Record> for RecordDto {
    fn from(record: Record) -> Self {
        Self {
            id: record.id,
            recorded_at: record.recorded_at,
            value: record.value,
        }
    }
}

/// Response payload shared by all dashboard routes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPage {
    /// Confirmation message, absent on plain reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Records at or above the display threshold.
    pub records: Vec<RecordDto>,
}

impl DashboardPage {
    fn new(message: Option<String>, records: Vec<Record>) -> Self {
        Self {
            message,
            records: records.into_iter().map(RecordDto::from).collect(),
        }
    }
}

/// Current records at or above the display threshold.
#[get("/")]
pub async fn index(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let records = state.query.list().await?;
    Ok(HttpResponse::Ok().json(DashboardPage::new(None, records)))
}

/// Wipe the store and repopulate it from the provider.
#[get("/refresh")]
pub async fn refresh(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let outcome = state.command.refresh().await?;
    let message = format!("Data refreshed on: {}", outcome.refreshed_at.to_rfc3339());
    Ok(HttpResponse::Ok().json(DashboardPage::new(Some(message), outcome.records)))
}

/// Wipe the store without fetching replacement data.
#[get("/resetDB")]
pub async fn reset_db(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    state.command.reset().await?;
    Ok(HttpResponse::Ok().json(DashboardPage::new(
        Some("Database emptied".to_owned()),
        Vec::new(),
    )))
}

#[cfg(test)]
mod tests {
    //! Handler behaviour over mocked dashboard ports.

    use std::sync::Arc;

    use actix_web::{App, test, web};
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::{
        MockDashboardCommand, MockDashboardQuery, RefreshOutcome,
    };

    fn record(id: i32, value: f64) -> Record {
        Record {
            id,
            recorded_at: "2024-01-01T01:00:00Z".to_owned(),
            value,
        }
    }

    fn state(command: MockDashboardCommand, query: MockDashboardQuery) -> HttpState {
        HttpState::new(Arc::new(command), Arc::new(query))
    }

    async fn get_json(state: HttpState, uri: &str) -> (u16, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(index)
                .service(refresh)
                .service(reset_db),
        )
        .await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = response.status().as_u16();
        let body = test::read_body_json(response).await;
        (status, body)
    }

    #[actix_web::test]
    async fn index_lists_records_without_a_message() {
        let command = MockDashboardCommand::new();
        let mut query = MockDashboardQuery::new();
        query
            .expect_list()
            .times(1)
            .return_once(|| Ok(vec![record(1, 15.0)]));

        let (status, body) = get_json(state(command, query), "/").await;

        assert_eq!(status, 200);
        assert!(body["message"].is_null());
        assert_eq!(body["records"][0]["id"], 1);
        assert_eq!(body["records"][0]["recordedAt"], "2024-01-01T01:00:00Z");
        assert_eq!(body["records"][0]["value"], 15.0);
    }

    #[actix_web::test]
    async fn refresh_reports_the_completion_timestamp() {
        let mut command = MockDashboardCommand::new();
        let query = MockDashboardQuery::new();
        command.expect_refresh().times(1).return_once(|| {
            Ok(RefreshOutcome {
                refreshed_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
                records: vec![record(2, 12.0)],
            })
        });

        let (status, body) = get_json(state(command, query), "/refresh").await;

        assert_eq!(status, 200);
        assert_eq!(
            body["message"],
            "Data refreshed on: 2024-01-02T03:04:05+00:00"
        );
        assert_eq!(body["records"].as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn reset_db_confirms_an_empty_store() {
        let mut command = MockDashboardCommand::new();
        let query = MockDashboardQuery::new();
        command.expect_reset().times(1).return_once(|| Ok(()));

        let (status, body) = get_json(state(command, query), "/resetDB").await;

        assert_eq!(status, 200);
        assert_eq!(body["message"], "Database emptied");
        assert_eq!(body["records"].as_array().map(Vec::len), Some(0));
    }

    #[actix_web::test]
    async fn refresh_failure_is_reported_not_masked() {
        let mut command = MockDashboardCommand::new();
        let query = MockDashboardQuery::new();
        command
            .expect_refresh()
            .times(1)
            .return_once(|| Err(Error::service_unavailable("provider down")));

        let (status, body) = get_json(state(command, query), "/refresh").await;

        assert_eq!(status, 503);
        assert_eq!(body["code"], "service_unavailable");
        assert_eq!(body["message"], "provider down");
    }
}
