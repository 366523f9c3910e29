use cee_graph::{NodeKind, PipelineContext};

use crate::audit::record_strip;

const STAGE: &str = "repair.threshold_sweep";
const THRESHOLD_FIELDS: &[&str] = &[
    "data.goal_threshold",
    "data.goal_threshold_raw",
    "data.goal_threshold_unit",
    "data.goal_threshold_cap",
];

/// Strip an untrustworthy goal threshold. A threshold
/// with no backing raw value can't have been derived from the brief; a
/// round raw value paired with a label that carries no digits at all is
/// more likely to be a hallucinated round number than an extracted one —
/// digits in the label are the safety signal that it was read off the text.
pub fn sweep_thresholds(ctx: &mut PipelineContext) {
    let goal_ids: Vec<String> = ctx.graph.nodes_of_kind(NodeKind::Goal).map(|n| n.id.clone()).collect();

    for id in goal_ids {
        let Some(node) = ctx.graph.node(&id) else { continue };
        let Some(data) = node.data.as_ref() else { continue };
        let Some(threshold) = data.goal_threshold else { continue };
        let _ = threshold;

        let no_raw = data.goal_threshold_raw.is_none();
        let round_without_digits = data.goal_threshold_raw.is_some_and(|raw| raw.fract() == 0.0)
            && !node.label.as_deref().unwrap_or_default().chars().any(|c| c.is_ascii_digit());

        let reason = if no_raw {
            Some("THRESHOLD_STRIPPED_NO_RAW")
        } else if round_without_digits {
            Some("THRESHOLD_STRIPPED_NO_DIGITS")
        } else {
            None
        };

        let Some(code) = reason else { continue };
        let Some(node) = ctx.graph.node_mut(&id) else { continue };
        let data = node.data_mut();
        data.goal_threshold = None;
        data.goal_threshold_raw = None;
        data.goal_threshold_unit = None;
        data.goal_threshold_cap = None;

        for field in THRESHOLD_FIELDS {
            record_strip(ctx, STAGE, &id, field, code, "goal threshold failed the repair-sweep safety check");
        }
    }
}
