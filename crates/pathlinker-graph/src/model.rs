//! Graph elements.
//!
//! Serialized shapes are the contract with the display layer:
//! node `{"id","label","type","subtype"?}`, edge `{"source","target"}`.

use pathlinker_common::PathlinkerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subtype carried by nodes for genes the user asked about.
pub const INPUT_GENE_SUBTYPE: &str = "input_gene";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Gene,
    Protein,
    Pathway,
}

impl NodeType {
    pub const ALL: [NodeType; 3] = [NodeType::Gene, NodeType::Protein, NodeType::Pathway];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Gene    => "gene",
            NodeType::Protein => "protein",
            NodeType::Pathway => "pathway",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = PathlinkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gene"    => Ok(NodeType::Gene),
            "protein" => Ok(NodeType::Protein),
            "pathway" => Ok(NodeType::Pathway),
            other     => Err(PathlinkerError::InvalidInput(format!("unknown node type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

impl Node {
    fn new(id: &str, node_type: NodeType, subtype: Option<String>) -> Self {
        Self {
            id: id.to_string(),
            label: format!("{} ({})", id, node_type),
            node_type,
            subtype,
        }
    }

    /// A gene supplied by the user.
    pub fn seed_gene(symbol: &str) -> Self {
        Self::new(symbol, NodeType::Gene, Some(INPUT_GENE_SUBTYPE.to_string()))
    }

    pub fn protein(symbol: &str) -> Self {
        Self::new(symbol, NodeType::Protein, None)
    }

    /// Pathway nodes are keyed by the pathway name as reported.
    pub fn pathway(name: &str) -> Self {
        Self::new(name, NodeType::Pathway, None)
    }

    pub fn is_seed(&self) -> bool {
        self.subtype.as_deref() == Some(INPUT_GENE_SUBTYPE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: &str, target: &str) -> Self {
        Self { source: source.to_string(), target: target.to_string() }
    }

    /// Direction-free identity of the edge.
    pub fn key(&self) -> (String, String) {
        unordered_key(&self.source, &self.target)
    }

    pub fn connects(&self, a: &str, b: &str) -> bool {
        self.key() == unordered_key(a, b)
    }
}

pub(crate) fn unordered_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// One entry of the assembled graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Element {
    Node(Node),
    Edge(Edge),
}

impl Element {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Element::Node(n) => Some(n),
            Element::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&Edge> {
        match self {
            Element::Edge(e) => Some(e),
            Element::Node(_) => None,
        }
    }

    pub fn is_edge(&self) -> bool {
        matches!(self, Element::Edge(_))
    }
}
