use cee_graph::PipelineContext;

/// Recompute `value = raw_value / cap`, clamped to `[0, 1]`, for every
/// factor carrying both fields.
pub fn normalise_caps(ctx: &mut PipelineContext) {
    for node in &mut ctx.graph.nodes {
        if !node.is_factor() {
            continue;
        }
        let Some(data) = node.data.as_mut() else { continue };
        if let (Some(raw), Some(cap)) = (data.raw_value, data.cap) {
            if cap != 0.0 {
                data.value = Some((raw / cap).clamp(0.0, 1.0));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cee_graph::{Graph, Node, NodeKind};
    use cee_utils::ids::{CorrelationId, RequestId};

    #[test]
    fn recomputes_value_from_raw_and_cap() {
        let mut graph = Graph::new("v1", 1);
        let mut node = Node::new("f1", NodeKind::Factor);
        node.data_mut().raw_value = Some(800.0);
        node.data_mut().cap = Some(1000.0);
        node.data_mut().value = Some(999.0);
        graph.nodes.push(node);

        let mut ctx = PipelineContext::new(RequestId::generate(), CorrelationId::generate(), graph);
        normalise_caps(&mut ctx);

        assert_eq!(ctx.graph.node("f1").unwrap().factor_value(), Some(0.8));
    }

    #[test]
    fn clamps_overflowing_ratio_to_one() {
        let mut graph = Graph::new("v1", 1);
        let mut node = Node::new("f1", NodeKind::Factor);
        node.data_mut().raw_value = Some(1500.0);
        node.data_mut().cap = Some(1000.0);
        graph.nodes.push(node);

        let mut ctx = PipelineContext::new(RequestId::generate(), CorrelationId::generate(), graph);
        normalise_caps(&mut ctx);

        assert_eq!(ctx.graph.node("f1").unwrap().factor_value(), Some(1.0));
    }
}
