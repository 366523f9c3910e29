use cee_graph::{Correction, FactorCategory, Layer, PipelineContext, Severity};

/// Any controllable factor missing a finite `data.value` gets defaulted to
/// `1.0`. The affected ids are recorded
/// on the context so the enricher's early-exit check and the repair
/// sweep's idempotent re-run can both see what the parser already touched.
pub fn apply_baseline_defaults(ctx: &mut PipelineContext) {
    let mut defaulted = Vec::new();

    for node in &mut ctx.graph.nodes {
        if !node.is_factor() {
            continue;
        }
        let is_controllable = node
            .data
            .as_ref()
            .and_then(|d| d.category)
            .is_some_and(|c| c == FactorCategory::Controllable);
        if !is_controllable {
            continue;
        }

        let needs_default = node
            .data
            .as_ref()
            .map_or(true, |d| d.value.is_none_or(|v| !v.is_finite()));
        if needs_default {
            node.data_mut().value = Some(1.0);
            defaulted.push(node.id.clone());
        }
    }

    for id in &defaulted {
        ctx.corrections.push(Correction::new(
            "BASELINE_VALUE_DEFAULTED",
            Layer::Cee,
            format!("nodes[{id}].data.value"),
            "controllable factor missing a finite value defaulted to 1.0",
            Severity::Info,
        ));
    }
    ctx.baseline_defaulted_factor_ids.extend(defaulted);
}
