//! Node-type filtering of an assembled graph.

use crate::model::{Element, NodeType};

/// Keep edges unconditionally and nodes whose type is allowed.
///
/// Edges whose endpoint was filtered out are kept as they are; pruning them
/// is left to the display layer.
pub fn filter_elements(elements: Vec<Element>, allowed: &[NodeType]) -> Vec<Element> {
    elements
        .into_iter()
        .filter(|el| match el {
            Element::Edge(_) => true,
            Element::Node(node) => allowed.contains(&node.node_type),
        })
        .collect()
}

/// A filtered graph with at most one element has nothing worth drawing.
pub fn is_no_match(elements: &[Element]) -> bool {
    elements.len() <= 1
}
