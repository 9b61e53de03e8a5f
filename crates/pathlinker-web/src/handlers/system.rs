//! Liveness and configuration summary.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct ApiHealth {
    pub status: &'static str,
    pub version: &'static str,
    pub max_genes: usize,
    pub required_score: u32,
    pub taxon_id: u32,
}

/// GET /api/health
pub async fn api_health(State(state): State<SharedState>) -> Json<ApiHealth> {
    Json(ApiHealth {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        max_genes: state.service.max_genes(),
        required_score: state.config.string.required_score,
        taxon_id: state.config.organism.taxon_id,
    })
}
