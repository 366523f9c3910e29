use cee_graph::{FactorCategory, PipelineContext};

use crate::audit::record_strip;

const STAGE: &str = "repair.unreachable_factor";

/// Any controllable factor with no incoming edge from an option node is
/// reclassified to `observable` (if it has a finite value) or `external`
/// (otherwise), stripping the now-inapplicable controllable-only fields.
pub fn reclassify_unreachable_factors(ctx: &mut PipelineContext) {
    let unreachable: Vec<String> = ctx
        .graph
        .nodes_of_kind(cee_graph::NodeKind::Factor)
        .filter(|n| n.factor_category() == Some(FactorCategory::Controllable))
        .filter(|n| !ctx.graph.has_incoming_option_edge(&n.id))
        .map(|n| n.id.clone())
        .collect();

    for id in unreachable {
        let has_finite_value = ctx
            .graph
            .node(&id)
            .and_then(cee_graph::Node::factor_value)
            .is_some_and(f64::is_finite);
        let new_category = if has_finite_value {
            FactorCategory::Observable
        } else {
            FactorCategory::External
        };

        let Some(node) = ctx.graph.node_mut(&id) else { continue };
        let data = node.data_mut();
        data.category = Some(new_category);
        let stripped = data.strip_controllable_only_fields();

        for field in stripped {
            record_strip(
                ctx,
                STAGE,
                &id,
                field,
                "UNREACHABLE_FACTOR_RECLASSIFIED",
                "controllable factor has no incoming option edge",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cee_graph::{EffectDirection, Edge, Graph, Node, NodeKind};
    use cee_utils::ids::{CorrelationId, RequestId};

    fn ctx(graph: Graph) -> PipelineContext {
        PipelineContext::new(RequestId::generate(), CorrelationId::generate(), graph)
    }

    #[test]
    fn unreachable_controllable_factor_with_value_becomes_observable() {
        let mut graph = Graph::new("v1", 1);
        let mut factor = Node::new("f1", NodeKind::Factor);
        factor.data_mut().category = Some(FactorCategory::Controllable);
        factor.data_mut().value = Some(0.5);
        graph.nodes.push(factor);

        let mut c = ctx(graph);
        reclassify_unreachable_factors(&mut c);

        let node = c.graph.node("f1").unwrap();
        assert_eq!(node.factor_category(), Some(FactorCategory::Observable));
        assert!(node.factor_value().is_none());
        assert!(c.corrections.iter().any(|cr| cr.code == "UNREACHABLE_FACTOR_RECLASSIFIED"));
        assert!(c.field_deletions.iter().any(|fd| fd.field == "data.value"));
    }

    #[test]
    fn unreachable_controllable_factor_without_value_becomes_external() {
        let mut graph = Graph::new("v1", 1);
        let mut factor = Node::new("f1", NodeKind::Factor);
        factor.data_mut().category = Some(FactorCategory::Controllable);
        graph.nodes.push(factor);

        let mut c = ctx(graph);
        reclassify_unreachable_factors(&mut c);

        assert_eq!(c.graph.node("f1").unwrap().factor_category(), Some(FactorCategory::External));
    }

    #[test]
    fn reachable_controllable_factor_is_untouched() {
        let mut graph = Graph::new("v1", 1);
        let mut factor = Node::new("f1", NodeKind::Factor);
        factor.data_mut().category = Some(FactorCategory::Controllable);
        factor.data_mut().value = Some(0.5);
        graph.nodes.push(factor);
        graph.nodes.push(Node::new("o1", NodeKind::Option));
        graph.edges.push(Edge::new("e1", "o1", "f1", 0.5, 0.1, 0.9, EffectDirection::Positive));

        let mut c = ctx(graph);
        reclassify_unreachable_factors(&mut c);

        assert_eq!(c.graph.node("f1").unwrap().factor_category(), Some(FactorCategory::Controllable));
        assert!(c.corrections.is_empty());
    }
}
