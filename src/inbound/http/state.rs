//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DashboardCommand, DashboardQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Mutation port: refresh and reset.
    pub command: Arc<dyn DashboardCommand>,
    /// Read port: threshold-filtered listing.
    pub query: Arc<dyn DashboardQuery>,
}

impl HttpState {
    /// Bundle the dashboard ports for handler injection.
    pub fn new(command: Arc<dyn DashboardCommand>, query: Arc<dyn DashboardQuery>) -> Self {
        Self { command, query }
    }
}
