//! Typed arguments and results for each capability in the adapter surface
//! (draftGraph, suggestOptions, repairGraph, clarifyBrief,
//! critiqueGraph, explainDiff; streamDraftGraph is modelled on
//! [`crate::LlmAdapter::stream_draft_graph`] directly since its result is a
//! stream, not a single value).

use cee_graph::{Graph, Node};

#[derive(Debug, Clone)]
pub struct DraftGraphArgs {
    pub brief: String,
    pub archetype_hint: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct DraftGraphResult {
    pub graph: Graph,
}

#[derive(Debug, Clone)]
pub struct SuggestOptionsArgs {
    pub graph: Graph,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct SuggestOptionsResult {
    pub options: Vec<Node>,
}

#[derive(Debug, Clone)]
pub struct RepairGraphArgs {
    pub graph: Graph,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RepairGraphResult {
    pub graph: Graph,
}

#[derive(Debug, Clone)]
pub struct ClarifyBriefArgs {
    pub brief: String,
}

#[derive(Debug, Clone)]
pub struct ClarifyBriefResult {
    pub questions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CritiqueGraphArgs {
    pub graph: Graph,
}

#[derive(Debug, Clone)]
pub struct CritiqueGraphResult {
    pub findings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ExplainDiffArgs {
    pub before: Graph,
    pub after: Graph,
}

#[derive(Debug, Clone)]
pub struct ExplainDiffResult {
    pub explanation: String,
}
