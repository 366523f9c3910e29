use thiserror::Error;

use cee_enricher::EnrichError;
use cee_parser::ParseError;
use cee_utils::error::{CeeError, CeeErrorCode};
use cee_utils::trace::Trace;

/// Stage failures, mapped onto the closed taxonomy at the boundary.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("upstream response failed parsing: {0}")]
    Parse(#[from] ParseError),

    #[error("enrichment could not proceed: {0}")]
    Enrich(#[from] EnrichError),

    #[error("the legacy pipeline is disabled")]
    LegacyPipelineDisabled,
}

/// Stable, greppable message for the legacy-pipeline gate ("when
/// disabled, entry points fail with a stable, greppable message").
pub const LEGACY_PIPELINE_DISABLED_MESSAGE: &str = "cee_pipeline: legacy pipeline disabled (set CEE_LEGACY_PIPELINE_ENABLED=1 to re-enable)";

impl PipelineError {
    /// Map this failure onto the wire-shaped [`CeeError`]:
    /// - Upstream non-JSON/empty/schema-invalid → `CEE_LLM_VALIDATION_FAILED` (400), with recovery.
    /// - Degenerate graph crashing enrichment → `CEE_GRAPH_INVALID` (400), `reason: enrichment_failed`.
    /// - Legacy-pipeline gate → `CEE_INTERNAL_ERROR` (500): a caller that hits this despite the
    /// config flag has a code bug, not a recoverable runtime condition.
    #[must_use]
    pub fn into_cee_error(self, trace: Trace) -> CeeError {
        match self {
            Self::Parse(err) => CeeError::new(
                CeeErrorCode::CeeLlmValidationFailed,
                err.to_string(),
                trace,
            )
            .with_details(serde_json::json!({ "failure_code": err.failure_code() }))
            .with_recovery(
                "retry the draft-graph call; if this persists, simplify the brief",
                vec!["confirm the upstream adapter returns JSON matching the draft-graph schema".to_string()],
            ),
            Self::Enrich(err) => CeeError::new(CeeErrorCode::CeeGraphInvalid, err.to_string(), trace)
                .with_details(serde_json::json!({ "reason": "enrichment_failed" }))
                .with_recovery(
                    "simplify the graph before retrying enrichment",
                    vec!["remove degenerate or empty option/factor structures".to_string()],
                ),
            Self::LegacyPipelineDisabled => {
                CeeError::new(CeeErrorCode::CeeInternalError, LEGACY_PIPELINE_DISABLED_MESSAGE, trace)
            }
        }
    }
}
