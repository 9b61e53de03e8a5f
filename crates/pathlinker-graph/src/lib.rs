//! pathlinker-graph — Gene → protein → pathway network assembly.
//!
//! - `model`:     node/edge elements as handed to the display layer
//! - `registry`:  run-scoped, append-only dedup registry
//! - `pathways`:  fail-soft pathway resolution
//! - `assembler`: per-gene expansion and the shared-interactor pass
//! - `filter`:    node-type filtering
//! - `service`:   request validation and user-facing outcomes

pub mod model;
pub mod registry;
pub mod pathways;
pub mod assembler;
pub mod filter;
pub mod service;

pub use model::{Edge, Element, Node, NodeType};
pub use registry::AssemblyRun;
pub use pathways::PathwayResolver;
pub use assembler::GraphAssembler;
pub use filter::{filter_elements, is_no_match};
pub use service::{GeneInputError, NetworkOutcome, NetworkRequest, NetworkService};
