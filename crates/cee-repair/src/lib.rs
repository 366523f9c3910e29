//! The deterministic repair sweep: an ordered, idempotent
//! sequence of stages, each appending `Correction`/`FieldDeletion` audit
//! entries rather than silently mutating the graph.

mod audit;
mod baseline;
mod cap_norm;
mod cycle_break;
mod reconciliation;
mod threshold_sweep;
mod unreachable;

use cee_graph::PipelineContext;

/// Run every repair stage in order against `ctx.graph`.
pub fn repair(ctx: &mut PipelineContext) {
    ctx.run_stage("repair.unreachable_factor", unreachable::reclassify_unreachable_factors);
    ctx.run_stage("repair.structural_reconciliation", reconciliation::reconcile_structure);
    ctx.run_stage("repair.threshold_sweep", threshold_sweep::sweep_thresholds);
    ctx.run_stage("repair.baseline_defaulting", baseline::default_missing_baselines);
    ctx.run_stage("repair.cap_normalisation", cap_norm::normalise_caps);
    ctx.run_stage("repair.dag_check", cycle_break::break_cycles);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cee_graph::{EffectDirection, Edge, FactorCategory, Graph, Node, NodeKind};
    use cee_utils::ids::{CorrelationId, RequestId};

    #[test]
    fn repair_runs_all_six_stages_in_order() {
        let mut graph = Graph::new("v1", 1);
        graph.nodes.push(Node::new("a", NodeKind::Factor));
        graph.nodes.push(Node::new("b", NodeKind::Factor));
        graph.edges.push(Edge::new("e1", "a", "b", 0.9, 0.1, 0.9, EffectDirection::Positive));
        graph.edges.push(Edge::new("e2", "b", "a", 0.1, 0.1, 0.5, EffectDirection::Positive));

        let mut ctx = PipelineContext::new(RequestId::generate(), CorrelationId::generate(), graph);
        repair(&mut ctx);

        assert_eq!(ctx.stage_trace.len(), 6);
        assert!(ctx.graph.is_dag());
    }

    #[test]
    fn repair_is_idempotent_on_a_second_pass() {
        let mut graph = Graph::new("v1", 1);
        let mut factor = Node::new("f1", NodeKind::Factor);
        factor.data_mut().category = Some(FactorCategory::Controllable);
        graph.nodes.push(factor);
        graph.nodes.push(Node::new("o1", NodeKind::Option));
        graph.edges.push(Edge::new("e1", "o1", "f1", 0.5, 0.1, 0.9, EffectDirection::Positive));

        let mut ctx = PipelineContext::new(RequestId::generate(), CorrelationId::generate(), graph);
        repair(&mut ctx);
        let corrections_after_first = ctx.corrections.len();
        repair(&mut ctx);

        assert_eq!(ctx.graph.node("f1").unwrap().factor_value(), Some(1.0));
        assert_eq!(ctx.corrections.len(), corrections_after_first);
    }
}
