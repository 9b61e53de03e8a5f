//! Trait for protein-protein interaction data access.

use async_trait::async_trait;
use pathlinker_common::{PathlinkerError, Result};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Access to an interaction database (STRING in production).
///
/// Both calls are single-attempt. An `Err` is a transport failure and aborts
/// the whole assembly batch; "not found" is expressed as `Ok(None)`.
#[async_trait]
pub trait InteractionSource: Send + Sync {
    /// Map a free-text gene symbol to the database's canonical identifier.
    async fn resolve_identifier(&self, symbol: &str) -> Result<Option<String>>;

    /// Symbols of every protein appearing in the identifier's network above
    /// the configured confidence threshold. May include the queried protein.
    async fn fetch_interactors(&self, identifier: &str) -> Result<BTreeSet<String>>;
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// In-memory interaction source with a call counter and failure injection.
#[derive(Default)]
pub struct MockInteractionSource {
    ids: HashMap<String, String>,
    networks: HashMap<String, BTreeSet<String>>,
    failing: HashSet<String>,
    failing_networks: HashSet<String>,
    calls: AtomicUsize,
}

impl MockInteractionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a symbol with the given interactors. The network also
    /// reports the queried symbol itself, as STRING does.
    pub fn with(mut self, symbol: &str, interactors: &[&str]) -> Self {
        let id = Self::mock_id(symbol);
        self.ids.insert(symbol.to_uppercase(), id.clone());
        let network = self.networks.entry(id).or_default();
        if !interactors.is_empty() {
            network.insert(symbol.to_uppercase());
        }
        network.extend(interactors.iter().map(|s| s.to_string()));
        self
    }

    /// Identifier lookups for this symbol fail as a transport error.
    pub fn failing_on(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_uppercase());
        self
    }

    /// The symbol resolves, but fetching its network fails.
    pub fn failing_network_on(mut self, symbol: &str) -> Self {
        let id = Self::mock_id(symbol);
        self.ids.insert(symbol.to_uppercase(), id.clone());
        self.failing_networks.insert(id);
        self
    }

    /// Total number of remote calls issued.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn mock_id(symbol: &str) -> String {
        format!("9606.MOCK_{}", symbol.to_uppercase())
    }

    fn outage(&self, what: &str) -> PathlinkerError {
        PathlinkerError::UpstreamStatus {
            service: "STRING",
            status: 503,
            url: format!("mock://string/{}", what),
        }
    }
}

#[async_trait]
impl InteractionSource for MockInteractionSource {
    async fn resolve_identifier(&self, symbol: &str) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = symbol.trim().to_uppercase();
        if self.failing.contains(&key) {
            return Err(self.outage(&key));
        }
        Ok(self.ids.get(&key).cloned())
    }

    async fn fetch_interactors(&self, identifier: &str) -> Result<BTreeSet<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_networks.contains(identifier) {
            return Err(self.outage(identifier));
        }
        Ok(self.networks.get(identifier).cloned().unwrap_or_default())
    }
}
