//! STRING REST API client.
//!
//! Endpoints (relative to the configured base, default https://string-db.org/api):
//! - `/json/get_string_ids` — symbol → STRING identifier
//! - `/json/network`        — interaction edges around one identifier

use async_trait::async_trait;
use pathlinker_common::{Config, Result, SandboxClient};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

use super::InteractionSource;

/// One record from `get_string_ids`; only the identifier is used.
#[derive(Debug, Clone, Deserialize)]
pub struct StringIdRecord {
    #[serde(rename = "stringId")]
    pub string_id: String,
}

/// One edge record from `network`.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkEdge {
    #[serde(rename = "preferredName_A")]
    pub preferred_name_a: String,
    #[serde(rename = "preferredName_B")]
    pub preferred_name_b: String,
}

pub struct StringDbClient {
    client: SandboxClient,
    base_url: String,
    species: u32,
    required_score: u32,
}

impl StringDbClient {
    pub fn new(client: SandboxClient, config: &Config) -> Self {
        Self {
            client,
            base_url: config.string.base_url.trim_end_matches('/').to_string(),
            species: config.organism.taxon_id,
            required_score: config.string.required_score,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let body = self.client
            .get(&url)?
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        decode_json(&body)
    }
}

#[async_trait]
impl InteractionSource for StringDbClient {
    #[instrument(skip(self))]
    async fn resolve_identifier(&self, symbol: &str) -> Result<Option<String>> {
        let records: Vec<StringIdRecord> = self
            .get_json(
                "/json/get_string_ids",
                &[
                    ("identifiers", symbol.to_string()),
                    ("species", self.species.to_string()),
                ],
            )
            .await?;

        debug!(count = records.len(), "STRING identifier lookup returned records");
        Ok(first_identifier(&records))
    }

    #[instrument(skip(self))]
    async fn fetch_interactors(&self, identifier: &str) -> Result<BTreeSet<String>> {
        let edges: Vec<NetworkEdge> = self
            .get_json(
                "/json/network",
                &[
                    ("identifiers", identifier.to_string()),
                    ("species", self.species.to_string()),
                    ("required_score", self.required_score.to_string()),
                ],
            )
            .await?;

        debug!(edges = edges.len(), "STRING network returned edges");
        Ok(interactor_union(&edges))
    }
}

/// Decode a STRING response body. Bodies that are not the expected JSON
/// surface as serialization errors, separate from transport errors.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}

/// The first match wins; an empty list means "not found".
pub fn first_identifier(records: &[StringIdRecord]) -> Option<String> {
    records.first().map(|r| r.string_id.clone())
}

/// Union of both endpoints of every edge. Edge direction and the identity of
/// the queried protein are discarded.
pub fn interactor_union(edges: &[NetworkEdge]) -> BTreeSet<String> {
    edges
        .iter()
        .flat_map(|e| [e.preferred_name_a.clone(), e.preferred_name_b.clone()])
        .collect()
}
