//! Network assembly.
//!
//! For each seed gene: STRING identifier → interactors → KEGG pathways for
//! the gene and every interactor. A second pass links seeds that share at
//! least one interactor. Remote calls are awaited one at a time.
//!
//! Failures of the identifier or interactor lookup abort the batch; pathway
//! failures never do (see `pathways`).

use pathlinker_common::Result;
use pathlinker_sources::{InteractionSource, PathwaySource};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::model::{Element, Node};
use crate::pathways::{keyword_matches, normalize_keyword, PathwayResolver};
use crate::registry::AssemblyRun;

#[derive(Clone)]
pub struct GraphAssembler {
    interactions: Arc<dyn InteractionSource>,
    pathways: PathwayResolver,
}

impl GraphAssembler {
    pub fn new(interactions: Arc<dyn InteractionSource>, pathways: Arc<dyn PathwaySource>) -> Self {
        Self {
            interactions,
            pathways: PathwayResolver::new(pathways),
        }
    }

    /// Assemble the deduplicated element list for a batch of genes.
    ///
    /// Symbols are trimmed and uppercased, blanks are skipped and repeats
    /// collapse into one seed. `keyword` restricts pathway nodes to names
    /// containing it (case-insensitive); blank means no restriction.
    #[instrument(skip(self, genes), fields(genes = genes.len()))]
    pub async fn assemble<S: AsRef<str>>(
        &self,
        genes: &[S],
        keyword: Option<&str>,
    ) -> Result<Vec<Element>> {
        Ok(self.assemble_run(genes, keyword).await?.into_elements())
    }

    /// Same as `assemble` but hands back the registry for inspection.
    pub async fn assemble_run<S: AsRef<str>>(
        &self,
        genes: &[S],
        keyword: Option<&str>,
    ) -> Result<AssemblyRun> {
        let keyword = normalize_keyword(keyword);
        let mut run = AssemblyRun::new();

        // Seeds first, so a gene the user asked about stays a gene node even
        // when an earlier seed reports it as an interactor.
        let seeds = normalize_symbols(genes);
        for seed in &seeds {
            run.add_seed(seed);
        }

        for seed in &seeds {
            self.expand_seed(&mut run, seed, keyword.as_deref()).await?;
        }

        let inferred = link_seeds_sharing_interactors(&mut run);
        info!(
            seeds = seeds.len(),
            nodes = run.node_count(),
            edges = run.edge_count(),
            inferred,
            "Assembled network"
        );
        Ok(run)
    }

    async fn expand_seed(&self, run: &mut AssemblyRun, gene: &str, keyword: Option<&str>) -> Result<()> {
        let Some(identifier) = self.interactions.resolve_identifier(gene).await? else {
            info!(gene = %gene, "No interaction-database identifier, keeping seed without interactors");
            return Ok(());
        };

        let reported = self.interactions.fetch_interactors(&identifier).await?;
        let interactors: BTreeSet<String> = normalize_symbols(&reported.into_iter().collect::<Vec<_>>())
            .into_iter()
            .collect();
        debug!(gene = %gene, identifier = %identifier, count = interactors.len(), "Fetched interactors");

        for interactor in &interactors {
            run.register_node(Node::protein(interactor));
            run.register_edge(gene, interactor);
        }

        // The reported set can contain the gene itself; resolve it only once.
        let symbols = std::iter::once(gene).chain(
            interactors.iter().map(String::as_str).filter(|s| *s != gene),
        );
        for symbol in symbols {
            self.attach_pathways(run, symbol, keyword).await;
        }

        run.record_interactors(gene, interactors);
        Ok(())
    }

    async fn attach_pathways(&self, run: &mut AssemblyRun, symbol: &str, keyword: Option<&str>) {
        if !run.claim_pathway_lookup(symbol) {
            return;
        }
        for name in self.pathways.resolve_pathways(symbol).await {
            if !keyword_matches(&name, keyword) {
                continue;
            }
            run.register_node(Node::pathway(&name));
            run.register_edge(symbol, &name);
        }
    }
}

/// Link every pair of distinct seeds whose interactor sets intersect.
/// Returns the number of edges added.
pub fn link_seeds_sharing_interactors(run: &mut AssemblyRun) -> usize {
    let seeds = run.seeds().to_vec();
    let mut pairs = Vec::new();
    for (i, a) in seeds.iter().enumerate() {
        for b in &seeds[i + 1..] {
            let shared = match (run.interactors_of(a), run.interactors_of(b)) {
                (Some(x), Some(y)) => !x.is_disjoint(y),
                _ => false,
            };
            if shared {
                pairs.push((a.clone(), b.clone()));
            }
        }
    }

    pairs
        .into_iter()
        .filter(|(a, b)| run.register_edge(a, b))
        .count()
}

/// Trim, uppercase, drop blanks and repeats; first occurrence keeps its place.
pub fn normalize_symbols<S: AsRef<str>>(symbols: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let symbol = symbol.as_ref().trim().to_uppercase();
        if !symbol.is_empty() && !out.contains(&symbol) {
            out.push(symbol);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeType;
    use pathlinker_sources::{MockInteractionSource, MockPathwaySource};
    use pretty_assertions::assert_eq;

    fn assembler(interactions: MockInteractionSource, pathways: MockPathwaySource) -> GraphAssembler {
        GraphAssembler::new(Arc::new(interactions), Arc::new(pathways))
    }

    #[test]
    fn test_normalize_symbols() {
        assert_eq!(
            normalize_symbols(&[" tp53", "TP53 ", "", "  ", "brca1"]),
            vec!["TP53".to_string(), "BRCA1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_single_gene_expansion() {
        let asm = assembler(
            MockInteractionSource::new().with("TP53", &["MDM2"]),
            MockPathwaySource::new()
                .with("TP53", &["p53 signaling pathway"])
                .with("MDM2", &["p53 signaling pathway"]),
        );
        let run = asm.assemble_run(&["TP53"], None).await.unwrap();

        assert!(run.contains_node("TP53"));
        assert!(run.contains_node("MDM2"));
        assert!(run.contains_node("p53 signaling pathway"));
        assert!(run.contains_edge("TP53", "MDM2"));
        assert!(run.contains_edge("TP53", "p53 signaling pathway"));
        assert!(run.contains_edge("MDM2", "p53 signaling pathway"));
        assert!(!run.contains_edge("TP53", "TP53"));
        assert_eq!(run.node_count(), 3);
        assert_eq!(run.edge_count(), 3);
    }

    #[tokio::test]
    async fn test_interactor_symbols_normalized() {
        let asm = assembler(
            MockInteractionSource::new().with("TP53", &["mdm2 ", "MDM2"]),
            MockPathwaySource::new(),
        );
        let run = asm.assemble_run(&["TP53"], None).await.unwrap();
        assert_eq!(run.interactors_of("TP53").map(|s| s.len()), Some(2)); // TP53 itself + MDM2
        let proteins: Vec<&str> = run
            .elements()
            .iter()
            .filter_map(Element::as_node)
            .filter(|n| n.node_type == NodeType::Protein)
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(proteins, vec!["MDM2"]);
    }

    #[tokio::test]
    async fn test_shared_pathway_lookups_issued_once() {
        let interactions = MockInteractionSource::new()
            .with("TP53", &["MDM2"])
            .with("CDKN1A", &["MDM2"]);
        let pathways = Arc::new(MockPathwaySource::new().with("MDM2", &["p53 signaling pathway"]));
        let asm = GraphAssembler::new(Arc::new(interactions), pathways.clone());

        asm.assemble(&["TP53", "CDKN1A"], None).await.unwrap();
        // TP53, MDM2, CDKN1A: one find each, plus link + get for MDM2
        assert_eq!(pathways.call_count(), 5);
    }
}
