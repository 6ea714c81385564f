//! Server construction and wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use reqwest::Url;
use tracing::info;

use open_air::Trace;
use open_air::domain::{DashboardPolicy, DashboardService};
use open_air::inbound::http::dashboard::{index, refresh, reset_db};
use open_air::inbound::http::health::{HealthState, live, ready};
use open_air::inbound::http::state::HttpState;
use open_air::outbound::openaq::OpenAqHttpSource;
use open_air::outbound::persistence::{DieselRecordRepository, MemoryRecordRepository};

/// Build the HTTP state from configuration.
///
/// Uses the Diesel-backed repository when a pool is available; otherwise the
/// in-memory store keeps the dashboard usable without a database.
fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let base_url = Url::parse(config.settings.base_url())
        .map_err(|e| std::io::Error::other(format!("invalid provider base url: {e}")))?;
    let source = OpenAqHttpSource::new(base_url, config.settings.request_timeout())
        .map_err(|e| std::io::Error::other(format!("failed to build provider client: {e}")))?;
    let policy = DashboardPolicy {
        city: config.settings.city().to_owned(),
        parameter: config.settings.parameter().to_owned(),
        threshold: config.settings.threshold(),
    };

    match &config.db_pool {
        Some(pool) => {
            let service = Arc::new(DashboardService::new(
                Arc::new(source),
                Arc::new(DieselRecordRepository::new(pool.clone())),
                Arc::new(DefaultClock),
                policy,
            ));
            Ok(HttpState::new(service.clone(), service))
        }
        None => {
            info!("no database configured, using the in-memory record store");
            let service = Arc::new(DashboardService::new(
                Arc::new(source),
                Arc::new(MemoryRecordRepository::new()),
                Arc::new(DefaultClock),
                policy,
            ));
            Ok(HttpState::new(service.clone(), service))
        }
    }
}

/// Construct and start the HTTP server.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the provider client cannot be built or
/// the listen address cannot be bound.
pub fn run(config: ServerConfig) -> std::io::Result<Server> {
    let state = build_http_state(&config)?;
    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .service(index)
            .service(refresh)
            .service(reset_db)
            .service(ready)
            .service(live)
    })
    .bind(config.settings.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
