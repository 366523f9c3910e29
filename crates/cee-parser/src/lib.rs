//! Raw upstream JSON to canonical [`cee_graph::Graph`]: node-kind
//! canonicalisation, edge-shape unification, unknown-field preservation,
//! and factor baseline defaulting.

mod baseline;
mod edge_parse;
mod error;
mod kind_table;
mod node_parse;

pub use error::ParseError;

use cee_graph::{Graph, GraphMetadata, PipelineContext};
use cee_utils::ids::{CorrelationId, RequestId};
use serde_json::Value;

/// Parse a raw upstream LLM JSON payload into a [`PipelineContext`] carrying
/// a fully canonicalised, cycle-free-ordered (not yet cycle-*broken* — that
/// is the repair sweep's job) [`Graph`].
///
/// `raw` is expected to be the top-level `result` object every LLM
/// capability response carries: `{"version", "seed", "nodes", "edges",
/// "metadata"?}`. A non-object `raw`, or `raw` that is JSON `null`, maps
/// onto [`ParseError::MissingResult`].
pub fn parse(
    raw: Value,
    request_id: RequestId,
    correlation_id: CorrelationId,
) -> Result<PipelineContext, ParseError> {
    if raw.is_null() {
        return Err(ParseError::MissingResult);
    }
    let obj = raw.as_object().ok_or_else(|| ParseError::InvalidSchema {
        reason: "result is not a JSON object".to_string(),
    })?;

    let version = obj
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or("v1")
        .to_string();
    let seed = obj.get("seed").and_then(Value::as_u64).unwrap_or(0);

    let raw_nodes = obj
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or_else(|| ParseError::InvalidSchema {
            reason: "result is missing a 'nodes' array".to_string(),
        })?;
    let raw_edges = obj
        .get("edges")
        .and_then(Value::as_array)
        .ok_or_else(|| ParseError::InvalidSchema {
            reason: "result is missing an 'edges' array".to_string(),
        })?;

    let mut graph = Graph::new(version, seed);

    if let Some(meta) = obj.get("metadata") {
        graph.metadata = serde_json::from_value::<GraphMetadata>(meta.clone())
            .map_err(|e| ParseError::InvalidSchema { reason: e.to_string() })?;
    }

    let mut corrections = Vec::new();
    for raw_node in raw_nodes {
        let (node, correction) = node_parse::parse_node(raw_node.clone())?;
        graph.nodes.push(node);
        if let Some(c) = correction {
            corrections.push(c);
        }
    }

    for raw_edge in raw_edges {
        let edge = edge_parse::parse_edge(raw_edge.clone())?;
        graph.edges.push(edge);
    }

    graph.canonicalize_order();

    let mut ctx = PipelineContext::new(request_id, correlation_id, graph);
    ctx.run_stage("parse.kind_canonicalization", |ctx| {
        ctx.corrections.extend(corrections.drain(..));
    });
    ctx.run_stage("parse.baseline_defaulting", baseline::apply_baseline_defaults);

    Ok(ctx)
}
