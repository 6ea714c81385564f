//! Binary entry-point: configuration, tracing, persistence, HTTP server.

mod server;

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use ortho_config::OrthoConfig;

use open_air::config::DashboardSettings;
use open_air::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::ServerConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = DashboardSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;

    let mut config = ServerConfig::new(settings.clone());
    if let Some(database_url) = settings.database_url() {
        let database_url = database_url.to_owned();
        let migration_url = database_url.clone();
        tokio::task::spawn_blocking(move || run_migrations(&migration_url))
            .await
            .map_err(|e| std::io::Error::other(format!("migration task failed: {e}")))?
            .map_err(std::io::Error::other)?;

        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    server::run(config)?.await
}
