//! The `Graph` aggregate: nodes, edges, metadata, canonical sorting, and
//! cycle detection.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::edge::Edge;
use crate::node::{Node, NodeKind};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphMetadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roots: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leaves: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    pub version: String,
    pub seed: u64,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub metadata: GraphMetadata,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Graph {
    #[must_use]
    pub fn new(version: impl Into<String>, seed: u64) -> Self {
        Self {
            version: version.into(),
            seed,
            nodes: Vec::new(),
            edges: Vec::new(),
            metadata: GraphMetadata::default(),
            extra: serde_json::Map::new(),
        }
    }

    /// Canonical ordering: nodes ascending by id, edges
    /// ascending by `(from, to, id)`. `sort_by` is a stable sort, so ties
    /// keep insertion order without extra bookkeeping.
    pub fn canonicalize_order(&mut self) {
        self.nodes.sort_by(|a, b| a.id.cmp(&b.id));
        self.edges.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    #[must_use]
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Edges whose `to` is `node_id` and whose `from` is an `Option` node —
    /// the "incoming edge from some option node" invariant for controllable
    /// factors.
    #[must_use]
    pub fn has_incoming_option_edge(&self, node_id: &str) -> bool {
        let option_ids: HashSet<&str> = self
            .nodes_of_kind(NodeKind::Option)
            .map(|n| n.id.as_str())
            .collect();
        self.edges
            .iter()
            .any(|e| e.to == node_id && option_ids.contains(e.from.as_str()))
    }

    /// All node ids referenced by any edge endpoint or by any option's
    /// `interventions` map, that do not exist as a node. An empty result
    /// satisfies the "referenced ids must exist" invariant.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<String> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let mut dangling = Vec::new();
        for edge in &self.edges {
            if !ids.contains(edge.from.as_str()) {
                dangling.push(edge.from.clone());
            }
            if !ids.contains(edge.to.as_str()) {
                dangling.push(edge.to.clone());
            }
        }
        for node in self.nodes_of_kind(NodeKind::Option) {
            if let Some(interventions) = node.interventions() {
                for factor_id in interventions.keys() {
                    if !ids.contains(factor_id.as_str()) {
                        dangling.push(factor_id.clone());
                    }
                }
            }
        }
        dangling.sort();
        dangling.dedup();
        dangling
    }

    /// Duplicate node ids, if any (the "unique ids" invariant).
    #[must_use]
    pub fn duplicate_node_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut dupes = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                dupes.insert(node.id.clone());
            }
        }
        let mut dupes: Vec<String> = dupes.into_iter().collect();
        dupes.sort();
        dupes
    }

    /// Detect cycles via DFS, returning each cycle as an ordered list of
    /// edge indices into `self.edges`. Used by the repair sweep's DAG check
    /// to find the weakest edge to drop per cycle.
    #[must_use]
    pub fn detect_cycles(&self) -> Vec<Vec<usize>> {
        let mut adjacency: HashMap<&str, Vec<usize>> = HashMap::new();
        for (idx, edge) in self.edges.iter().enumerate() {
            adjacency.entry(edge.from.as_str()).or_default().push(idx);
        }

        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks: HashMap<&str, Mark> =
            self.nodes.iter().map(|n| (n.id.as_str(), Mark::Unvisited)).collect();
        let mut path_edges: Vec<usize> = Vec::new();
        let mut path_nodes: Vec<&str> = Vec::new();
        let mut cycles = Vec::new();

        fn visit<'a>(
            node: &'a str,
            adjacency: &HashMap<&'a str, Vec<usize>>,
            edges: &[Edge],
            marks: &mut HashMap<&'a str, Mark>,
            path_edges: &mut Vec<usize>,
            path_nodes: &mut Vec<&'a str>,
            cycles: &mut Vec<Vec<usize>>,
        ) {
            marks.insert(node, Mark::InProgress);
            path_nodes.push(node);

            if let Some(out_edges) = adjacency.get(node) {
                for &edge_idx in out_edges {
                    let target = edges[edge_idx].to.as_str();
                    path_edges.push(edge_idx);
                    match marks.get(target).copied().unwrap_or(Mark::Unvisited) {
                        Mark::Unvisited => {
                            visit(target, adjacency, edges, marks, path_edges, path_nodes, cycles);
                        }
                        Mark::InProgress => {
                            if let Some(start) = path_nodes.iter().position(|&n| n == target) {
                                cycles.push(path_edges[start..].to_vec());
                            }
                        }
                        Mark::Done => {}
                    }
                    path_edges.pop();
                }
            }

            path_nodes.pop();
            marks.insert(node, Mark::Done);
        }

        let node_ids: Vec<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        for id in node_ids {
            if marks.get(id).copied().unwrap_or(Mark::Unvisited) == Mark::Unvisited {
                visit(
                    id,
                    &adjacency,
                    &self.edges,
                    &mut marks,
                    &mut path_edges,
                    &mut path_nodes,
                    &mut cycles,
                );
            }
        }

        cycles
    }

    #[must_use]
    pub fn is_dag(&self) -> bool {
        self.detect_cycles().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::EffectDirection;
    use crate::node::NodeKind;

    #[test]
    fn canonicalize_order_sorts_nodes_and_edges() {
        let mut graph = Graph::new("v1", 1);
        graph.nodes.push(Node::new("b", NodeKind::Factor));
        graph.nodes.push(Node::new("a", NodeKind::Factor));
        graph.edges.push(Edge::new("e2", "b", "a", 0.5, 0.1, 0.9, EffectDirection::Positive));
        graph.edges.push(Edge::new("e1", "a", "b", 0.5, 0.1, 0.9, EffectDirection::Positive));

        graph.canonicalize_order();

        assert_eq!(graph.nodes[0].id, "a");
        assert_eq!(graph.nodes[1].id, "b");
        assert_eq!(graph.edges[0].from, "a");
        assert_eq!(graph.edges[1].from, "b");
    }

    #[test]
    fn detects_simple_cycle() {
        let mut graph = Graph::new("v1", 1);
        graph.nodes.push(Node::new("a", NodeKind::Factor));
        graph.nodes.push(Node::new("b", NodeKind::Factor));
        graph.edges.push(Edge::new("e1", "a", "b", 0.5, 0.1, 0.9, EffectDirection::Positive));
        graph.edges.push(Edge::new("e2", "b", "a", 0.2, 0.1, 0.9, EffectDirection::Positive));

        let cycles = graph.detect_cycles();
        assert_eq!(cycles.len(), 1);
        assert!(!graph.is_dag());
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        let mut graph = Graph::new("v1", 1);
        graph.nodes.push(Node::new("a", NodeKind::Factor));
        graph.nodes.push(Node::new("b", NodeKind::Factor));
        graph.edges.push(Edge::new("e1", "a", "b", 0.5, 0.1, 0.9, EffectDirection::Positive));

        assert!(graph.is_dag());
    }

    #[test]
    fn dangling_references_reports_missing_ids() {
        let mut graph = Graph::new("v1", 1);
        graph.nodes.push(Node::new("a", NodeKind::Factor));
        graph.edges.push(Edge::new("e1", "a", "ghost", 0.5, 0.1, 0.9, EffectDirection::Positive));

        assert_eq!(graph.dangling_references(), vec!["ghost".to_string()]);
    }
}
