//! KEGG REST API client.
//!
//! All KEGG responses are plain text:
//! - `/find/genes/<symbol>`      — `<org>:<id>\t<description>` per line
//! - `/link/pathway/<gene_id>`   — `<gene_id>\t<pathway_id>` per line
//! - `/get/<pathway_id>`         — flat-file record, one `NAME` line

use async_trait::async_trait;
use pathlinker_common::{Config, PathlinkerError, Result, SandboxClient};
use tracing::{debug, instrument};

use super::PathwaySource;

const SERVICE: &str = "KEGG";

pub struct KeggClient {
    client: SandboxClient,
    base_url: String,
    organism_code: String,
    name_marker: String,
}

impl KeggClient {
    pub fn new(client: SandboxClient, config: &Config) -> Self {
        Self {
            client,
            base_url: config.kegg.base_url.trim_end_matches('/').to_string(),
            organism_code: config.organism.kegg_code.clone(),
            name_marker: config.kegg.name_marker.clone(),
        }
    }

    async fn get_text(&self, path: &str) -> Result<String> {
        let url = format!("{}/{}", self.base_url, path);
        let text = self.client
            .get(&url)?
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }
}

#[async_trait]
impl PathwaySource for KeggClient {
    #[instrument(skip(self))]
    async fn find_gene_id(&self, symbol: &str) -> Result<Option<String>> {
        let text = self.get_text(&format!("find/genes/{}", symbol.to_uppercase())).await?;
        Ok(parse_find_response(&text, &self.organism_code))
    }

    #[instrument(skip(self))]
    async fn linked_pathway_ids(&self, gene_id: &str) -> Result<Vec<String>> {
        let text = self.get_text(&format!("link/pathway/{}", gene_id)).await?;
        let ids = parse_link_response(&text)?;
        debug!(count = ids.len(), "KEGG pathway links");
        Ok(ids)
    }

    #[instrument(skip(self))]
    async fn pathway_name(&self, pathway_id: &str) -> Result<Option<String>> {
        let url = format!("{}/get/{}", self.base_url, pathway_id);
        let resp = self.client.get(&url)?.send().await?;
        if !resp.status().is_success() {
            debug!(status = resp.status().as_u16(), "KEGG record unavailable, skipping");
            return Ok(None);
        }
        let text = resp.text().await?;
        Ok(parse_pathway_name(&text, &self.name_marker))
    }
}

/// First gene identifier in the organism's namespace; other candidates are
/// discarded.
pub fn parse_find_response(text: &str, organism_code: &str) -> Option<String> {
    let prefix = format!("{}:", organism_code);
    text.trim()
        .lines()
        .find(|line| line.starts_with(&prefix))
        .and_then(|line| line.split('\t').next())
        .map(|id| id.trim().to_string())
}

/// Second column of every non-blank line. A line without one means the
/// response is not a link listing.
pub fn parse_link_response(text: &str) -> Result<Vec<String>> {
    text.trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.split('\t')
                .nth(1)
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .ok_or_else(|| {
                    PathlinkerError::malformed(SERVICE, format!("link line without pathway column: {:?}", line))
                })
        })
        .collect()
}

/// Remainder of the first line starting with the marker.
pub fn parse_pathway_name(text: &str, marker: &str) -> Option<String> {
    text.lines()
        .find_map(|line| line.strip_prefix(marker))
        .map(|rest| rest.trim().to_string())
        .filter(|name| !name.is_empty())
}
