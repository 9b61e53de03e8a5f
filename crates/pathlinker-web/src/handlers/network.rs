//! Network endpoint: gene symbols in, graph elements and a status line out.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pathlinker_common::PathlinkerError;
use pathlinker_graph::{Element, NetworkOutcome, NetworkRequest, NodeType};
use serde::{Deserialize, Serialize};

use crate::state::SharedState;

/// Query-string form of a network request; `types` is comma-separated.
#[derive(Debug, Default, Deserialize)]
pub struct NetworkQuery {
    pub genes: Option<String>,
    pub keyword: Option<String>,
    pub types: Option<String>,
}

impl NetworkQuery {
    pub fn into_request(self) -> Result<NetworkRequest, PathlinkerError> {
        let node_types = match self.types.as_deref() {
            Some(raw) => Some(parse_node_types(raw)?),
            None => None,
        };
        Ok(NetworkRequest { genes: self.genes, keyword: self.keyword, node_types })
    }
}

fn parse_node_types(raw: &str) -> Result<Vec<NodeType>, PathlinkerError> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

// === API Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiNetwork {
    pub elements: Vec<Element>,
    pub message: String,
}

pub struct NetworkReply(pub StatusCode, pub ApiNetwork);

impl From<NetworkOutcome> for NetworkReply {
    fn from(outcome: NetworkOutcome) -> Self {
        let status = match &outcome {
            NetworkOutcome::Graph(_) | NetworkOutcome::NoMatches => StatusCode::OK,
            NetworkOutcome::Invalid(_) => StatusCode::BAD_REQUEST,
            NetworkOutcome::Failed(_) => StatusCode::BAD_GATEWAY,
        };
        let message = outcome.message();
        NetworkReply(status, ApiNetwork { elements: outcome.into_elements(), message })
    }
}

impl IntoResponse for NetworkReply {
    fn into_response(self) -> Response {
        (self.0, Json(self.1)).into_response()
    }
}

// === API Endpoints ===

/// GET /api/network?genes=TP53,BRCA1&keyword=p53&types=gene,protein
pub async fn api_network_get(
    State(state): State<SharedState>,
    Query(query): Query<NetworkQuery>,
) -> NetworkReply {
    let request = match query.into_request() {
        Ok(request) => request,
        Err(e) => {
            return NetworkReply(
                StatusCode::BAD_REQUEST,
                ApiNetwork { elements: vec![], message: e.to_string() },
            )
        }
    };
    state.service.run(&request).await.into()
}

/// POST /api/network with a JSON `NetworkRequest` body
pub async fn api_network_post(
    State(state): State<SharedState>,
    Json(request): Json<NetworkRequest>,
) -> NetworkReply {
    state.service.run(&request).await.into()
}
