//! Size caps enforced server-side regardless of upstream behaviour.

use cee_graph::Graph;

use crate::error::LlmError;

pub const MAX_NODES: usize = 50;
pub const MAX_EDGES: usize = 200;

/// Reject a graph that exceeds the node/edge caps. Upstream adapters may
/// return arbitrarily large graphs; this is the backstop the orchestrator
/// calls regardless of which adapter produced the graph.
pub fn enforce_size_caps(graph: &Graph) -> Result<(), LlmError> {
    if graph.nodes.len() > MAX_NODES {
        return Err(LlmError::SizeCapExceeded {
            kind: "nodes",
            count: graph.nodes.len(),
            cap: MAX_NODES,
        });
    }
    if graph.edges.len() > MAX_EDGES {
        return Err(LlmError::SizeCapExceeded {
            kind: "edges",
            count: graph.edges.len(),
            cap: MAX_EDGES,
        });
    }
    Ok(())
}
