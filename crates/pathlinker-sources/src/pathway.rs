//! Trait for pathway database access.

use async_trait::async_trait;
use pathlinker_common::{PathlinkerError, Result};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::kegg::parse_link_response;

/// The three lookups chained to go from a symbol to pathway names.
///
/// Implementations report failures as `Err`; deciding that pathway data is
/// optional is the caller's business.
#[async_trait]
pub trait PathwaySource: Send + Sync {
    /// Organism-scoped gene identifier (e.g. `hsa:7157`) for a symbol.
    async fn find_gene_id(&self, symbol: &str) -> Result<Option<String>>;

    /// Pathway identifiers linked to a gene identifier.
    async fn linked_pathway_ids(&self, gene_id: &str) -> Result<Vec<String>>;

    /// Human-readable name of a pathway; `None` when the record is
    /// unavailable or has no name line.
    async fn pathway_name(&self, pathway_id: &str) -> Result<Option<String>>;
}

// ── Mock Implementation for Testing ────────────────────────────────────────

#[derive(Default)]
pub struct MockPathwaySource {
    gene_ids: HashMap<String, String>,
    links: HashMap<String, Vec<String>>,
    names: HashMap<String, String>,
    link_listings: HashMap<String, String>,
    failing: HashSet<String>,
    failing_links: HashSet<String>,
    failing_names: HashSet<String>,
    calls: AtomicUsize,
}

impl MockPathwaySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the pathways a symbol participates in. Pathway names shared
    /// between symbols map to the same pathway identifier.
    pub fn with(mut self, symbol: &str, pathways: &[&str]) -> Self {
        let gene_id = Self::gene_id(symbol);
        self.gene_ids.insert(symbol.to_uppercase(), gene_id.clone());
        for name in pathways {
            let pathway_id = match self.names.iter().find(|(_, n)| n.as_str() == *name) {
                Some((id, _)) => id.clone(),
                None => {
                    let id = format!("path:hsa{:05}", self.names.len() + 1);
                    self.names.insert(id.clone(), name.to_string());
                    id
                }
            };
            self.links.entry(gene_id.clone()).or_default().push(pathway_id);
        }
        self
    }

    /// Serve a raw KEGG link listing for the symbol, parsed the way the
    /// real client parses it.
    pub fn with_link_listing(mut self, symbol: &str, listing: &str) -> Self {
        let gene_id = Self::gene_id(symbol);
        self.gene_ids.insert(symbol.to_uppercase(), gene_id.clone());
        self.link_listings.insert(gene_id, listing.to_string());
        self
    }

    /// Gene lookup for this symbol fails.
    pub fn failing_on(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_uppercase());
        self
    }

    /// Gene lookup succeeds, the pathway link lookup fails.
    pub fn failing_links_on(mut self, symbol: &str) -> Self {
        self.failing_links.insert(Self::gene_id(symbol));
        self
    }

    /// Fetching the record of the pathway with this name fails.
    pub fn failing_record(mut self, pathway_name: &str) -> Self {
        self.failing_names.insert(pathway_name.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn gene_id(symbol: &str) -> String {
        format!("hsa:{}", symbol.to_uppercase())
    }

    fn outage(path: String) -> PathlinkerError {
        PathlinkerError::UpstreamStatus {
            service: "KEGG",
            status: 500,
            url: format!("mock://kegg/{}", path),
        }
    }
}

#[async_trait]
impl PathwaySource for MockPathwaySource {
    async fn find_gene_id(&self, symbol: &str) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = symbol.to_uppercase();
        if self.failing.contains(&key) {
            return Err(Self::outage(format!("find/genes/{}", key)));
        }
        Ok(self.gene_ids.get(&key).cloned())
    }

    async fn linked_pathway_ids(&self, gene_id: &str) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_links.contains(gene_id) {
            return Err(Self::outage(format!("link/pathway/{}", gene_id)));
        }
        if let Some(listing) = self.link_listings.get(gene_id) {
            return parse_link_response(listing);
        }
        Ok(self.links.get(gene_id).cloned().unwrap_or_default())
    }

    async fn pathway_name(&self, pathway_id: &str) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = self.names.get(pathway_id).cloned();
        if name.as_ref().is_some_and(|n| self.failing_names.contains(n)) {
            return Err(Self::outage(format!("get/{}", pathway_id)));
        }
        Ok(name)
    }
}
