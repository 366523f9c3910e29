//! Pipeline-level telemetry events.

use cee_graph::PipelineContext;

pub fn stage_complete(ctx: &PipelineContext) {
    let stages: Vec<&str> = ctx.stage_trace.iter().map(|s| s.stage.as_str()).collect();
    tracing::info!(
        event = "pipeline.stage_complete",
        request_id = %ctx.request_id,
        stages = ?stages,
        corrections = ctx.total_corrections(),
        field_deletions = ctx.total_field_deletions(),
        "pipeline finished all stages"
    );
}

pub fn stage_failed(stage: &str, error: &dyn std::fmt::Display) {
    tracing::error!(
        event = "pipeline.stage_failed",
        stage,
        error = %error,
        "pipeline stage failed"
    );
}

pub fn legacy_pipeline_rejected() {
    tracing::warn!(
        event = "pipeline.legacy_rejected",
        "legacy pipeline entry point called while disabled"
    );
}
