use cee_graph::{Correction, FieldDeletion, Layer, PipelineContext, Severity};

/// Record one stripped field as both a correction (layer `cee`) and a
/// field-deletion audit entry, as every stripping in the repair sweep must
/// be ("Every stripping is recorded both as a correction ... and
/// as a field-deletion audit entry").
pub fn record_strip(
    ctx: &mut PipelineContext,
    stage: &str,
    node_id: &str,
    field: &str,
    code: &str,
    reason: &str,
) {
    ctx.corrections.push(Correction::new(
        code,
        Layer::Cee,
        format!("nodes[{node_id}].{field}"),
        reason,
        Severity::Info,
    ));
    ctx.field_deletions.push(FieldDeletion::new(stage, node_id, field, reason));
}
