use serde::Serialize;

use cee_graph::{Correction, FieldDeletion, Graph, PipelineContext};
use cee_utils::trace::Trace;

use crate::archetype::Archetype;
use crate::caps::{self, ResponseLimits, BIAS_FINDINGS_MAX, EVIDENCE_SUGGESTIONS_MAX, OPTIONS_MAX, SENSITIVITY_SUGGESTIONS_MAX};
use crate::quality::Quality;
use crate::validation::ValidationIssue;

/// The outward-facing response body: everything the pipeline
/// produced, plus the attachments the envelope finaliser is responsible
/// for.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub trace: Trace,
    pub quality: Quality,
    pub archetype: Archetype,
    pub response_limits: ResponseLimits,
    pub validation_issues: Vec<ValidationIssue>,
    pub graph: serde_json::Value,
    pub corrections: Vec<Correction>,
    pub field_deletions: Vec<FieldDeletion>,
}

impl Envelope {
    #[must_use]
    pub fn new(trace: Trace, ctx: &PipelineContext, quality: Quality, archetype: Archetype) -> Self {
        Self {
            trace,
            quality,
            archetype,
            response_limits: ResponseLimits::default(),
            validation_issues: Vec::new(),
            graph: package_graph(&ctx.graph),
            corrections: ctx.corrections.clone(),
            field_deletions: ctx.field_deletions.clone(),
        }
    }

    #[must_use]
    pub fn with_validation_issue(mut self, issue: ValidationIssue) -> Self {
        self.validation_issues.push(issue);
        self
    }

    /// Attach an `ENGINE_DEGRADED` issue whenever `trace.engine` reports a
    /// degraded signal: the upstream HTTP response carried an
    /// `X-Olumi-Degraded` header or equivalent signal.
    #[must_use]
    pub fn with_engine_degradation_check(mut self) -> Self {
        if let Some(signal) = self.trace.engine.degraded.clone() {
            self.validation_issues.push(ValidationIssue::engine_degraded(&signal));
        }
        self
    }

    pub fn cap_options<T>(&mut self, options: &mut Vec<T>) {
        self.response_limits.options_truncated = caps::truncate_list(options, OPTIONS_MAX);
    }

    pub fn cap_bias_findings<T>(&mut self, findings: &mut Vec<T>) {
        self.response_limits.bias_findings_truncated = caps::truncate_list(findings, BIAS_FINDINGS_MAX);
    }

    pub fn cap_evidence_suggestions<T>(&mut self, suggestions: &mut Vec<T>) {
        self.response_limits.evidence_suggestions_truncated =
            caps::truncate_list(suggestions, EVIDENCE_SUGGESTIONS_MAX);
    }

    pub fn cap_sensitivity_suggestions<T>(&mut self, suggestions: &mut Vec<T>) {
        self.response_limits.sensitivity_suggestions_truncated =
            caps::truncate_list(suggestions, SENSITIVITY_SUGGESTIONS_MAX);
    }

    #[must_use]
    pub fn has_validation_issues(&self) -> bool {
        !self.validation_issues.is_empty()
    }
}

/// Serialize the graph for the wire: nodes as-is, edges in their dual shape
/// so downstream readers can use either accepted edge form.
fn package_graph(graph: &Graph) -> serde_json::Value {
    let nodes: Vec<serde_json::Value> = graph
        .nodes
        .iter()
        .map(|n| serde_json::to_value(n).unwrap_or(serde_json::Value::Null))
        .collect();
    let edges: Vec<serde_json::Value> = graph.edges.iter().map(cee_graph::Edge::to_dual_shape_json).collect();

    serde_json::json!({
        "version": graph.version,
        "seed": graph.seed,
        "nodes": nodes,
        "edges": edges,
        "metadata": graph.metadata,
    })
}
