//! Library modules for the open-air dashboard.
//!
//! The crate follows a hexagonal layout: `domain` owns the types, ports, and
//! the refresh pipeline; `inbound` and `outbound` hold the HTTP, provider,
//! and persistence adapters; `middleware` carries request tracing.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Request tracing middleware re-exported for server wiring.
pub use middleware::trace::Trace;
