use cee_graph::{Correction, FactorCategory, Layer, PipelineContext, Severity};

use crate::audit::record_strip;

const STAGE: &str = "repair.structural_reconciliation";

/// Recompute each factor's category from the option-edge topology and
/// compare it against what was declared on input; on mismatch, apply the
/// inferred category and strip now-inapplicable fields.
pub fn reconcile_structure(ctx: &mut PipelineContext) {
    let ids: Vec<String> = ctx
        .graph
        .nodes_of_kind(cee_graph::NodeKind::Factor)
        .map(|n| n.id.clone())
        .collect();

    for id in ids {
        let Some(node) = ctx.graph.node(&id) else { continue };
        let Some(declared) = node.data.as_ref().and_then(|d| d.declared_category) else { continue };
        let inferred = infer_category(ctx, &id);
        if declared == inferred {
            continue;
        }

        let Some(node) = ctx.graph.node_mut(&id) else { continue };
        let previous = node.data.as_ref().and_then(|d| d.category);
        let data = node.data_mut();
        data.category = Some(inferred);

        ctx.corrections.push(
            Correction::new(
                "CATEGORY_OVERRIDE",
                Layer::Cee,
                format!("nodes[{id}].data.category"),
                "declared category disagreed with option-edge topology",
                Severity::Warn,
            )
            .with_before_after(
                previous.map(|c| serde_json::json!(c)),
                Some(serde_json::json!(inferred)),
            ),
        );

        if inferred != FactorCategory::Controllable {
            let Some(node) = ctx.graph.node_mut(&id) else { continue };
            let stripped = node.data_mut().strip_controllable_only_fields();
            for field in stripped {
                record_strip(
                    ctx,
                    STAGE,
                    &id,
                    field,
                    "CATEGORY_OVERRIDE_STRIP",
                    "field not applicable to the topology-inferred category",
                );
            }
        }
    }
}

fn infer_category(ctx: &PipelineContext, node_id: &str) -> FactorCategory {
    if ctx.graph.has_incoming_option_edge(node_id) {
        return FactorCategory::Controllable;
    }
    let has_finite_value = ctx
        .graph
        .node(node_id)
        .and_then(cee_graph::Node::factor_value)
        .is_some_and(f64::is_finite);
    if has_finite_value {
        FactorCategory::Observable
    } else {
        FactorCategory::External
    }
}
