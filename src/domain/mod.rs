//! Domain types, ports, and services.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — transport-agnostic failure payload.
//! - `Record` / `NewRecord` — the stored measurement aggregate.
//! - `ports` — hexagonal boundary traits and their error enums.
//! - `DashboardService` — the refresh pipeline behind the driving ports.

pub mod dashboard_service;
pub mod error;
pub mod ports;
pub mod record;

pub use self::dashboard_service::{DashboardPolicy, DashboardService};
pub use self::error::{Error, ErrorCode};
pub use self::record::{NewRecord, Record};
