//! Shared application state for the web server.

use pathlinker_common::Config;
use pathlinker_graph::NetworkService;
use std::sync::Arc;

/// Shared state injected into every Axum handler. Immutable: every request
/// assembles into its own run-scoped registry.
#[derive(Clone)]
pub struct AppState {
    pub service: NetworkService,
    pub config: Config,
}

impl AppState {
    pub fn new(service: NetworkService, config: Config) -> Self {
        Self { service, config }
    }

    /// Wire the production STRING and KEGG clients.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let service = NetworkService::from_config(&config)?;
        Ok(Self::new(service, config))
    }
}

pub type SharedState = Arc<AppState>;
