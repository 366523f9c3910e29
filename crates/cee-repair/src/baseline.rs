use cee_graph::{Correction, FactorCategory, Layer, PipelineContext, Severity};

/// Idempotent re-run of baseline defaulting: the
/// normaliser may already have defaulted controllable factors without a
/// finite value to `1.0`; running it again here must be a no-op for
/// factors it already touched.
pub fn default_missing_baselines(ctx: &mut PipelineContext) {
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
        let needs_default = node.data.as_ref().map_or(true, |d| d.value.is_none_or(|v| !v.is_finite()));
        if needs_default {
            node.data_mut().value = Some(1.0);
            defaulted.push(node.id.clone());
        }
    }

    for id in defaulted {
        if !ctx.baseline_defaulted_factor_ids.contains(&id) {
            ctx.baseline_defaulted_factor_ids.push(id.clone());
        }
        ctx.corrections.push(Correction::new(
            "BASELINE_VALUE_DEFAULTED",
            Layer::Cee,
            format!("nodes[{id}].data.value"),
            "controllable factor missing a finite value defaulted to 1.0",
            Severity::Info,
        ));
    }
}
