use cee_graph::{Correction, Layer, PipelineContext, Severity};

/// Detect cycles and drop the weakest edge (smallest `strength_mean *
/// exists_probability`) on each, recording `CYCLE_BROKEN` with before/after
///. Re-detects after every removal since dropping one
/// edge can change which edges still participate in a cycle.
pub fn break_cycles(ctx: &mut PipelineContext) {
    loop {
        let cycles = ctx.graph.detect_cycles();
        let Some(cycle) = cycles.into_iter().next() else { break };

        let Some(&weakest_idx) = cycle
            .iter()
            .min_by(|&&a, &&b| {
                ctx.graph.edges[a]
                    .cycle_break_weight()
                    .total_cmp(&ctx.graph.edges[b].cycle_break_weight())
            })
        else {
            break;
        };

        let removed = ctx.graph.edges.remove(weakest_idx);
        ctx.corrections.push(
            Correction::new(
                "CYCLE_BROKEN",
                Layer::Cee,
                format!("edges[{}]", removed.id),
                "dropped the weakest edge on a detected cycle",
                Severity::Warn,
            )
            .with_before_after(Some(removed.to_dual_shape_json()), None),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cee_graph::{EffectDirection, Edge, Graph, Node, NodeKind};
    use cee_utils::ids::{CorrelationId, RequestId};

    #[test]
    fn breaks_a_simple_cycle_by_dropping_the_weakest_edge() {
        let mut graph = Graph::new("v1", 1);
        graph.nodes.push(Node::new("a", NodeKind::Factor));
        graph.nodes.push(Node::new("b", NodeKind::Factor));
        graph.edges.push(Edge::new("strong", "a", "b", 0.9, 0.1, 0.9, EffectDirection::Positive));
        graph.edges.push(Edge::new("weak", "b", "a", 0.1, 0.1, 0.5, EffectDirection::Positive));

        let mut ctx = PipelineContext::new(RequestId::generate(), CorrelationId::generate(), graph);
        break_cycles(&mut ctx);

        assert!(ctx.graph.is_dag());
        assert!(ctx.graph.edges.iter().all(|e| e.id != "weak"));
        assert!(ctx.corrections.iter().any(|c| c.code == "CYCLE_BROKEN"));
    }

    #[test]
    fn acyclic_graph_is_untouched() {
        let mut graph = Graph::new("v1", 1);
        graph.nodes.push(Node::new("a", NodeKind::Factor));
        graph.nodes.push(Node::new("b", NodeKind::Factor));
        graph.edges.push(Edge::new("e1", "a", "b", 0.5, 0.1, 0.9, EffectDirection::Positive));

        let mut ctx = PipelineContext::new(RequestId::generate(), CorrelationId::generate(), graph);
        break_cycles(&mut ctx);

        assert_eq!(ctx.graph.edges.len(), 1);
        assert!(ctx.corrections.is_empty());
    }
}
