//! Run-scoped registry of everything discovered during one assembly.
//!
//! Append-only: elements are pushed in discovery order and never removed or
//! rewritten. A fresh instance is built for every request and dropped with
//! it; nothing here is shared between requests.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::model::{unordered_key, Edge, Element, Node};

#[derive(Debug, Default)]
pub struct AssemblyRun {
    elements: Vec<Element>,
    seen_nodes: HashSet<String>,
    seen_edges: HashSet<(String, String)>,
    /// Seeds in first-seen order.
    seeds: Vec<String>,
    gene_to_interactors: HashMap<String, BTreeSet<String>>,
    pathways_resolved: HashSet<String>,
}

impl AssemblyRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node unless one with the same id exists. Returns whether
    /// the node was added.
    pub fn register_node(&mut self, node: Node) -> bool {
        if !self.seen_nodes.insert(node.id.clone()) {
            return false;
        }
        self.elements.push(Element::Node(node));
        true
    }

    /// Register an edge unless the unordered pair is already present.
    /// Self-loops are never recorded.
    pub fn register_edge(&mut self, source: &str, target: &str) -> bool {
        if source == target {
            return false;
        }
        if !self.seen_edges.insert(unordered_key(source, target)) {
            return false;
        }
        self.elements.push(Element::Edge(Edge::new(source, target)));
        true
    }

    /// Register a user-supplied gene. Idempotent.
    pub fn add_seed(&mut self, symbol: &str) -> bool {
        if self.seeds.iter().any(|s| s == symbol) {
            return false;
        }
        self.seeds.push(symbol.to_string());
        self.register_node(Node::seed_gene(symbol))
    }

    pub fn record_interactors(&mut self, gene: &str, interactors: BTreeSet<String>) {
        self.gene_to_interactors.insert(gene.to_string(), interactors);
    }

    pub fn interactors_of(&self, gene: &str) -> Option<&BTreeSet<String>> {
        self.gene_to_interactors.get(gene)
    }

    /// Claim a symbol for pathway resolution. Returns false when its
    /// pathways were already attached earlier in this run.
    pub fn claim_pathway_lookup(&mut self, symbol: &str) -> bool {
        self.pathways_resolved.insert(symbol.to_string())
    }

    pub fn seeds(&self) -> &[String] {
        &self.seeds
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.seen_nodes.contains(id)
    }

    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        self.seen_edges.contains(&unordered_key(a, b))
    }

    pub fn node_count(&self) -> usize {
        self.seen_nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.seen_edges.len()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}
