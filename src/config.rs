//! Dashboard configuration loaded via OrthoConfig.
//!
//! Values resolve CLI flags over `OPEN_AIR_*` environment variables over a
//! configuration file, falling back to the stock deployment: Los Angeles
//! PM2.5 against the public OpenAQ endpoint.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_CITY: &str = "Los Angeles";
const DEFAULT_PARAMETER: &str = "pm25";
const DEFAULT_THRESHOLD: f64 = 10.0;
const DEFAULT_BASE_URL: &str = "https://api.openaq.org";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values for one dashboard deployment.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "OPEN_AIR")]
pub struct DashboardSettings {
    /// City filter sent to the provider.
    pub city: Option<String>,
    /// Pollutant parameter sent to the provider.
    pub parameter: Option<String>,
    /// Minimum value a record must reach to be displayed.
    pub threshold: Option<f64>,
    /// Base URL of the measurement provider.
    pub base_url: Option<String>,
    /// Outbound request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL; absent selects the in-memory store.
    pub database_url: Option<String>,
}

impl DashboardSettings {
    /// Return the configured city.
    pub fn city(&self) -> &str {
        self.city.as_deref().unwrap_or(DEFAULT_CITY)
    }

    /// Return the configured pollutant parameter.
    pub fn parameter(&self) -> &str {
        self.parameter.as_deref().unwrap_or(DEFAULT_PARAMETER)
    }

    /// Return the configured display threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold.unwrap_or(DEFAULT_THRESHOLD)
    }

    /// Return the configured provider base URL.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Return the outbound request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Return the configured bind address.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the configured database URL, when one was provided.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration resolution.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> DashboardSettings {
        DashboardSettings::load_from_iter([OsString::from("open-air")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_cover_the_stock_deployment() {
        let _guard = lock_env([
            ("OPEN_AIR_CITY", None::<String>),
            ("OPEN_AIR_PARAMETER", None::<String>),
            ("OPEN_AIR_THRESHOLD", None::<String>),
            ("OPEN_AIR_BASE_URL", None::<String>),
            ("OPEN_AIR_REQUEST_TIMEOUT_SECS", None::<String>),
            ("OPEN_AIR_BIND_ADDR", None::<String>),
            ("OPEN_AIR_DATABASE_URL", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.city(), "Los Angeles");
        assert_eq!(settings.parameter(), "pm25");
        assert_eq!(settings.threshold(), 10.0);
        assert_eq!(settings.base_url(), "https://api.openaq.org");
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080");
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("OPEN_AIR_CITY", Some("Delhi".to_owned())),
            ("OPEN_AIR_PARAMETER", Some("pm10".to_owned())),
            ("OPEN_AIR_THRESHOLD", Some("25.5".to_owned())),
            (
                "OPEN_AIR_BASE_URL",
                Some("https://mirror.example".to_owned()),
            ),
            ("OPEN_AIR_REQUEST_TIMEOUT_SECS", Some("5".to_owned())),
            ("OPEN_AIR_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "OPEN_AIR_DATABASE_URL",
                Some("postgres://localhost/openair".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.city(), "Delhi");
        assert_eq!(settings.parameter(), "pm10");
        assert_eq!(settings.threshold(), 25.5);
        assert_eq!(settings.base_url(), "https://mirror.example");
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
        assert_eq!(settings.bind_addr(), "127.0.0.1:9090");
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/openair")
        );
    }
}
