use thiserror::Error;

/// Enrichment failures map onto `CEE_GRAPH_INVALID` at the envelope layer,
/// `reason: enrichment_failed`.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("graph has no nodes to enrich")]
    EmptyGraph,
}
