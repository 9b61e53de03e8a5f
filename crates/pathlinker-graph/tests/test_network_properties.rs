//! Behavioural properties of network requests, driven by in-memory sources.
//!
//! Run with: cargo test --package pathlinker-graph --test test_network_properties

use std::collections::HashSet;
use std::sync::Arc;

use pathlinker_graph::{Element, GeneInputError, NetworkOutcome, NetworkRequest, NetworkService, NodeType};
use pathlinker_sources::{MockInteractionSource, MockPathwaySource};
use pretty_assertions::assert_eq;

fn request(genes: &str) -> NetworkRequest {
    NetworkRequest { genes: Some(genes.to_string()), ..Default::default() }
}

fn service(interactions: MockInteractionSource, pathways: MockPathwaySource) -> NetworkService {
    NetworkService::new(Arc::new(interactions), Arc::new(pathways), 10)
}

fn nodes_with_id<'a>(elements: &'a [Element], id: &str) -> Vec<&'a pathlinker_graph::Node> {
    elements.iter().filter_map(Element::as_node).filter(|n| n.id == id).collect()
}

fn has_edge(elements: &[Element], a: &str, b: &str) -> bool {
    elements.iter().filter_map(Element::as_edge).any(|e| e.connects(a, b))
}

fn p53_world() -> (MockInteractionSource, MockPathwaySource) {
    let interactions = MockInteractionSource::new()
        .with("TP53", &["MDM2", "EP300", "BRCA1"])
        .with("BRCA1", &["TP53", "BARD1", "EP300"])
        .with("KRAS", &["RAF1"]);
    let pathways = MockPathwaySource::new()
        .with("TP53", &["p53 signaling pathway", "Apoptosis"])
        .with("MDM2", &["p53 signaling pathway"])
        .with("BRCA1", &["Homologous recombination"])
        .with("RAF1", &["MAPK signaling pathway"]);
    (interactions, pathways)
}

#[tokio::test]
async fn test_case_variant_duplicates_collapse() {
    let (interactions, pathways) = p53_world();
    let outcome = service(interactions, pathways).run(&request("TP53, tp53")).await;

    let elements = outcome.elements();
    assert_eq!(nodes_with_id(elements, "TP53").len(), 1);
    assert_eq!(nodes_with_id(elements, "TP53")[0].node_type, NodeType::Gene);
}

#[tokio::test]
async fn test_no_duplicate_unordered_edges() {
    let (interactions, pathways) = p53_world();
    let outcome = service(interactions, pathways).run(&request("TP53, BRCA1, KRAS")).await;

    let mut seen = HashSet::new();
    for edge in outcome.elements().iter().filter_map(Element::as_edge) {
        assert_ne!(edge.source, edge.target, "self-loop on {}", edge.source);
        assert!(seen.insert(edge.key()), "duplicate edge {:?}", edge.key());
    }
    // TP53–BRCA1 is both a direct interaction (twice) and a shared-interactor pair.
    assert!(has_edge(outcome.elements(), "TP53", "BRCA1"));
}

#[tokio::test]
async fn test_seed_kept_when_unknown_to_interaction_db() {
    let (interactions, pathways) = p53_world();
    let outcome = service(interactions, pathways).run(&request("TP53, NOTAGENE")).await;

    let elements = outcome.elements();
    let seed = nodes_with_id(elements, "NOTAGENE");
    assert_eq!(seed.len(), 1);
    assert_eq!(seed[0].node_type, NodeType::Gene);
    assert_eq!(seed[0].subtype.as_deref(), Some("input_gene"));
    assert!(elements
        .iter()
        .filter_map(Element::as_edge)
        .all(|e| e.source != "NOTAGENE" && e.target != "NOTAGENE"));
}

#[tokio::test]
async fn test_seeds_sharing_interactor_are_linked() {
    let interactions = MockInteractionSource::new()
        .with("GENEA", &["SHARED"])
        .with("GENEB", &["SHARED"])
        .with("GENEC", &["OTHER"]);
    let outcome = service(interactions, MockPathwaySource::new())
        .run(&request("GENEA, GENEB, GENEC"))
        .await;

    let elements = outcome.elements();
    assert!(has_edge(elements, "GENEA", "GENEB"));
    assert!(!has_edge(elements, "GENEA", "GENEC"));
    assert!(!has_edge(elements, "GENEB", "GENEC"));
}

#[tokio::test]
async fn test_keyword_restricts_pathways() {
    let (interactions, pathways) = p53_world();
    let req = NetworkRequest {
        genes: Some("TP53".into()),
        keyword: Some("  P53 ".into()),
        node_types: None,
    };
    let outcome = service(interactions, pathways).run(&req).await;

    let elements = outcome.elements();
    let pathway_nodes: Vec<_> = elements
        .iter()
        .filter_map(Element::as_node)
        .filter(|n| n.node_type == NodeType::Pathway)
        .collect();
    assert_eq!(pathway_nodes.len(), 1);
    assert!(pathway_nodes.iter().all(|n| n.label.to_lowercase().contains("p53")));
    assert!(!has_edge(elements, "TP53", "Apoptosis"));
    assert!(!has_edge(elements, "BRCA1", "Homologous recombination"));
    assert!(has_edge(elements, "MDM2", "p53 signaling pathway"));
}

#[tokio::test]
async fn test_type_filter_drops_pathways_keeps_edges() {
    let (interactions, pathways) = p53_world();
    let req = NetworkRequest {
        genes: Some("TP53".into()),
        keyword: None,
        node_types: Some(vec![NodeType::Gene, NodeType::Protein]),
    };
    let outcome = service(interactions, pathways).run(&req).await;

    let elements = outcome.elements();
    assert!(elements
        .iter()
        .filter_map(Element::as_node)
        .all(|n| n.node_type != NodeType::Pathway));
    assert!(has_edge(elements, "TP53", "p53 signaling pathway"));
    assert!(has_edge(elements, "TP53", "Apoptosis"));
}

#[tokio::test]
async fn test_gene_limit_makes_no_remote_calls() {
    let interactions = Arc::new(MockInteractionSource::new().with("TP53", &["MDM2"]));
    let pathways = Arc::new(MockPathwaySource::new());
    let svc = NetworkService::new(interactions.clone(), pathways.clone(), 10);

    let genes = (1..=11).map(|i| format!("GENE{}", i)).collect::<Vec<_>>().join(", ");
    let outcome = svc.run(&request(&genes)).await;

    assert_eq!(outcome, NetworkOutcome::Invalid(GeneInputError::TooMany { count: 11, max: 10 }));
    assert!(outcome.elements().is_empty());
    assert_eq!(outcome.message(), "Limit to 10 genes.");
    assert_eq!(interactions.call_count(), 0);
    assert_eq!(pathways.call_count(), 0);
}

#[tokio::test]
async fn test_missing_genes_is_validation_error() {
    let (interactions, pathways) = p53_world();
    let outcome = service(interactions, pathways).run(&NetworkRequest::default()).await;
    assert_eq!(outcome, NetworkOutcome::Invalid(GeneInputError::Empty));
}

#[tokio::test]
async fn test_interaction_outage_aborts_batch() {
    let (interactions, pathways) = p53_world();
    let outcome = service(interactions.failing_on("BRCA1"), pathways)
        .run(&request("TP53, BRCA1"))
        .await;

    assert!(matches!(outcome, NetworkOutcome::Failed(_)));
    assert!(outcome.elements().is_empty());
    assert!(outcome.message().starts_with("Error: "));
    assert!(outcome.message().contains("STRING"));
}

#[tokio::test]
async fn test_network_outage_after_resolution_aborts_batch() {
    let (interactions, pathways) = p53_world();
    let interactions = Arc::new(interactions.failing_network_on("BRCA1"));
    let svc = NetworkService::new(interactions.clone(), Arc::new(pathways), 10);

    let outcome = svc.run(&request("TP53, BRCA1")).await;

    assert!(matches!(outcome, NetworkOutcome::Failed(_)));
    assert!(outcome.elements().is_empty());
    assert!(outcome.message().starts_with("Error: "));
    // TP53 resolved and expanded, BRCA1 resolved, then its network call failed
    assert_eq!(interactions.call_count(), 4);
}

#[tokio::test]
async fn test_pathway_chain_failure_only_costs_that_symbol() {
    let (interactions, pathways) = p53_world();
    let pathways = pathways
        .failing_links_on("BRCA1")
        .failing_record("Apoptosis");
    let outcome = service(interactions, pathways).run(&request("TP53, BRCA1")).await;

    let elements = outcome.elements();
    assert!(matches!(outcome, NetworkOutcome::Graph(_)));
    // TP53's record chain broke after its p53 name resolved: none are kept
    assert!(!has_edge(elements, "TP53", "p53 signaling pathway"));
    assert!(!has_edge(elements, "TP53", "Apoptosis"));
    assert!(!has_edge(elements, "BRCA1", "Homologous recombination"));
    assert!(has_edge(elements, "MDM2", "p53 signaling pathway"));
    assert!(has_edge(elements, "TP53", "BRCA1"));
    assert!(has_edge(elements, "BRCA1", "BARD1"));
}

#[tokio::test]
async fn test_malformed_link_listing_only_costs_that_symbol() {
    let (interactions, pathways) = p53_world();
    let pathways = pathways.with_link_listing("MDM2", "hsa:4193\tpath:hsa04115\nhsa:4193\n");
    let outcome = service(interactions, pathways).run(&request("TP53")).await;

    let elements = outcome.elements();
    assert_eq!(nodes_with_id(elements, "MDM2").len(), 1);
    assert!(!has_edge(elements, "MDM2", "p53 signaling pathway"));
    assert!(has_edge(elements, "TP53", "p53 signaling pathway"));
    assert!(has_edge(elements, "TP53", "MDM2"));
}

#[tokio::test]
async fn test_pathway_outage_is_absorbed() {
    let (interactions, pathways) = p53_world();
    let outcome = service(interactions, pathways.failing_on("TP53"))
        .run(&request("TP53"))
        .await;

    let elements = outcome.elements();
    assert!(!has_edge(elements, "TP53", "Apoptosis"));
    assert!(has_edge(elements, "MDM2", "p53 signaling pathway"));
    assert!(has_edge(elements, "TP53", "MDM2"));
}

#[tokio::test]
async fn test_lonely_seed_is_no_match() {
    let (interactions, pathways) = p53_world();
    let outcome = service(interactions, pathways).run(&request("NOTAGENE")).await;
    assert_eq!(outcome, NetworkOutcome::NoMatches);
    assert_eq!(outcome.message(), "No matching nodes after filtering.");
}

#[tokio::test]
async fn test_requests_do_not_share_state() {
    let (interactions, pathways) = p53_world();
    let svc = service(interactions, pathways);

    let first = svc.run(&request("TP53")).await;
    let second = svc.run(&request("TP53")).await;
    assert_eq!(first, second);
    assert!(nodes_with_id(second.elements(), "MDM2").len() == 1);
}
