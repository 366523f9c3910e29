use thiserror::Error;

/// Failures that map onto `CEE_LLM_VALIDATION_FAILED` at the envelope
/// layer. `failure_code` names the specific upstream failure
/// mode for telemetry and recovery hints, independent of the taxonomy
/// mapping itself (which lives in `cee-pipeline`).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("upstream response was not valid JSON")]
    NonJsonResponse,

    #[error("upstream response was empty")]
    EmptyResponse,

    #[error("upstream response failed schema validation: {reason}")]
    InvalidSchema { reason: String },

    #[error("upstream response is missing the draft-graph result field")]
    MissingResult,
}

impl ParseError {
    #[must_use]
    pub const fn failure_code(&self) -> &'static str {
        match self {
            Self::NonJsonResponse => "llm_non_json",
            Self::EmptyResponse => "openai_empty_response",
            Self::InvalidSchema { .. } => "openai_response_invalid_schema",
            Self::MissingResult => "draft_graph_missing_result",
        }
    }
}
