//! Request boundary: validate the raw gene input, assemble, filter, and turn
//! every outcome into something a user can read.

use pathlinker_common::{Config, PathlinkerError, SandboxClient};
use pathlinker_sources::{InteractionSource, KeggClient, PathwaySource, StringDbClient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::assembler::GraphAssembler;
use crate::filter::{filter_elements, is_no_match};
use crate::model::{Element, NodeType};

/// Rejected before any remote call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneInputError {
    #[error("Please enter at least one gene symbol.")]
    Empty,

    #[error("Limit to {max} genes.")]
    TooMany { count: usize, max: usize },
}

/// Split comma-separated gene text into trimmed, uppercased symbols.
/// Repeats count towards the limit; the assembler collapses them later.
pub fn parse_gene_input(input: Option<&str>, max_genes: usize) -> Result<Vec<String>, GeneInputError> {
    let genes: Vec<String> = input
        .unwrap_or_default()
        .split(',')
        .map(|g| g.trim().to_uppercase())
        .filter(|g| !g.is_empty())
        .collect();

    if genes.is_empty() {
        return Err(GeneInputError::Empty);
    }
    if genes.len() > max_genes {
        return Err(GeneInputError::TooMany { count: genes.len(), max: max_genes });
    }
    Ok(genes)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkRequest {
    /// Comma-separated gene symbols, e.g. "TP53, BRCA1".
    #[serde(default)]
    pub genes: Option<String>,
    /// Optional pathway keyword.
    #[serde(default)]
    pub keyword: Option<String>,
    /// Node types to keep; all types when absent.
    #[serde(default)]
    pub node_types: Option<Vec<NodeType>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NetworkOutcome {
    /// Filtered graph ready for display.
    Graph(Vec<Element>),
    /// Input rejected by validation.
    Invalid(GeneInputError),
    /// Assembly worked but nothing survived filtering.
    NoMatches,
    /// Identifier or interactor lookup failed; the batch was abandoned.
    Failed(String),
}

impl NetworkOutcome {
    pub fn elements(&self) -> &[Element] {
        match self {
            NetworkOutcome::Graph(elements) => elements,
            _ => &[],
        }
    }

    pub fn into_elements(self) -> Vec<Element> {
        match self {
            NetworkOutcome::Graph(elements) => elements,
            _ => Vec::new(),
        }
    }

    /// Status line for the display layer; empty on success.
    pub fn message(&self) -> String {
        match self {
            NetworkOutcome::Graph(_) => String::new(),
            NetworkOutcome::Invalid(e) => e.to_string(),
            NetworkOutcome::NoMatches => "No matching nodes after filtering.".to_string(),
            NetworkOutcome::Failed(cause) => format!("Error: {}", cause),
        }
    }
}

/// Everything needed to answer a network request. Holds no per-request
/// state, so one instance can serve concurrent requests.
#[derive(Clone)]
pub struct NetworkService {
    assembler: GraphAssembler,
    max_genes: usize,
}

impl NetworkService {
    pub fn new(
        interactions: Arc<dyn InteractionSource>,
        pathways: Arc<dyn PathwaySource>,
        max_genes: usize,
    ) -> Self {
        Self {
            assembler: GraphAssembler::new(interactions, pathways),
            max_genes,
        }
    }

    /// Production wiring: STRING and KEGG over one shared sandboxed client.
    pub fn from_config(config: &Config) -> Result<Self, PathlinkerError> {
        let client = SandboxClient::new(config)?;
        let interactions = Arc::new(StringDbClient::new(client.clone(), config));
        let pathways = Arc::new(KeggClient::new(client, config));
        Ok(Self::new(interactions, pathways, config.limits.max_genes))
    }

    pub fn max_genes(&self) -> usize {
        self.max_genes
    }

    pub async fn run(&self, request: &NetworkRequest) -> NetworkOutcome {
        let genes = match parse_gene_input(request.genes.as_deref(), self.max_genes) {
            Ok(genes) => genes,
            Err(e) => {
                warn!(error = %e, "Rejected network request");
                return NetworkOutcome::Invalid(e);
            }
        };

        let elements = match self.assembler.assemble(genes.as_slice(), request.keyword.as_deref()).await {
            Ok(elements) => elements,
            Err(e) => {
                error!(error = %e, "Network assembly failed");
                return NetworkOutcome::Failed(e.to_string());
            }
        };

        let allowed = request.node_types.as_deref().unwrap_or(&NodeType::ALL);
        let filtered = filter_elements(elements, allowed);
        if is_no_match(&filtered) {
            info!(genes = genes.len(), "No elements left after filtering");
            return NetworkOutcome::NoMatches;
        }

        info!(genes = genes.len(), elements = filtered.len(), "Network request served");
        NetworkOutcome::Graph(filtered)
    }
}
