//! Pathway resolution: symbol → gene id → pathway ids → pathway names.
//!
//! Pathways are enrichment. A failure anywhere in the chain is logged and
//! turned into an empty result so one bad lookup never costs the batch.

use pathlinker_common::Result;
use pathlinker_sources::PathwaySource;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct PathwayResolver {
    source: Arc<dyn PathwaySource>,
}

impl PathwayResolver {
    pub fn new(source: Arc<dyn PathwaySource>) -> Self {
        Self { source }
    }

    /// Pathway names for a symbol; empty on any failure.
    pub async fn resolve_pathways(&self, symbol: &str) -> Vec<String> {
        match self.try_resolve(symbol).await {
            Ok(names) => names,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Pathway lookup failed, continuing without pathways");
                Vec::new()
            }
        }
    }

    /// The fallible chain behind `resolve_pathways`.
    pub async fn try_resolve(&self, symbol: &str) -> Result<Vec<String>> {
        let symbol = symbol.trim().to_uppercase();

        let Some(gene_id) = self.source.find_gene_id(&symbol).await? else {
            debug!(symbol = %symbol, "No pathway-database gene for symbol");
            return Ok(Vec::new());
        };

        let pathway_ids = self.source.linked_pathway_ids(&gene_id).await?;
        let mut names = Vec::with_capacity(pathway_ids.len());
        for pathway_id in &pathway_ids {
            if let Some(name) = self.source.pathway_name(pathway_id).await? {
                names.push(name);
            }
        }

        debug!(symbol = %symbol, gene_id = %gene_id, count = names.len(), "Resolved pathways");
        Ok(names)
    }
}

/// Lowercased keyword, or `None` when no filtering should happen.
pub fn normalize_keyword(keyword: Option<&str>) -> Option<String> {
    keyword
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
}

/// Case-insensitive substring match; everything matches without a keyword.
/// `keyword` must already be normalized.
pub fn keyword_matches(pathway_name: &str, keyword: Option<&str>) -> bool {
    match keyword {
        Some(k) => pathway_name.to_lowercase().contains(k),
        None => true,
    }
}
