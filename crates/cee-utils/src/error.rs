//! The closed error taxonomy from
//!
//! `CeeErrorCode` is the canonical set of codes the service can return.
//! `CeeError` is the wire-shaped body (`{schema: "cee.error.v1", code,
//! message, retryable, trace, details?, recovery?}`) that every stage
//! boundary ultimately maps its failures onto.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::trace::Trace;

/// Closed taxonomy of error codes. New variants must not be added without
/// updating the HTTP-status/retryability mapping below — that mapping is
/// load-bearing for clients' backoff behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CeeErrorCode {
    #[error("input fails schema")]
    CeeValidationFailed,
    #[error("upstream output is non-JSON, empty, or schema-invalid")]
    CeeLlmValidationFailed,
    #[error("enrichment/repair cannot proceed on a degenerate graph")]
    CeeGraphInvalid,
    #[error("per-feature request budget exceeded")]
    CeeRateLimit,
    #[error("upstream returned a 5xx or unclassifiable non-429 error")]
    CeeLlmUpstreamError,
    #[error("engine reports unavailability")]
    CeeServiceUnavailable,
    #[error("upstream deadline exceeded")]
    CeeLlmTimeout,
    #[error("unexpected internal failure")]
    CeeInternalError,
}

impl CeeErrorCode {
    /// HTTP status this code maps to, per
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::CeeValidationFailed
            | Self::CeeLlmValidationFailed
            | Self::CeeGraphInvalid => 400,
            Self::CeeRateLimit => 429,
            Self::CeeLlmUpstreamError => 502,
            Self::CeeServiceUnavailable => 503,
            Self::CeeLlmTimeout => 504,
            Self::CeeInternalError => 500,
        }
    }

    /// Whether a client may retry this class of failure, per
    #[must_use]
    pub const fn retryable(self) -> bool {
        matches!(
            self,
            Self::CeeRateLimit
                | Self::CeeLlmUpstreamError
                | Self::CeeServiceUnavailable
                | Self::CeeLlmTimeout
        )
    }

    /// Stable wire string, e.g. `"CEE_LLM_VALIDATION_FAILED"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CeeValidationFailed => "CEE_VALIDATION_FAILED",
            Self::CeeLlmValidationFailed => "CEE_LLM_VALIDATION_FAILED",
            Self::CeeGraphInvalid => "CEE_GRAPH_INVALID",
            Self::CeeRateLimit => "CEE_RATE_LIMIT",
            Self::CeeLlmUpstreamError => "CEE_LLM_UPSTREAM_ERROR",
            Self::CeeServiceUnavailable => "CEE_SERVICE_UNAVAILABLE",
            Self::CeeLlmTimeout => "CEE_LLM_TIMEOUT",
            Self::CeeInternalError => "CEE_INTERNAL_ERROR",
        }
    }
}

/// `recovery` is populated only for `CEE_LLM_VALIDATION_FAILED` and
/// `CEE_GRAPH_INVALID`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recovery {
    pub suggestion: String,
    pub hints: Vec<String>,
}

/// The wire-shaped error body, `schema: "cee.error.v1"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CeeError {
    pub schema: String,
    pub code: CeeErrorCode,
    pub message: String,
    pub retryable: bool,
    pub trace: Trace,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery: Option<Recovery>,
}

impl CeeError {
    #[must_use]
    pub fn new(code: CeeErrorCode, message: impl Into<String>, trace: Trace) -> Self {
        Self {
            schema: "cee.error.v1".to_string(),
            code,
            message: message.into(),
            retryable: code.retryable(),
            trace,
            details: None,
            recovery: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    #[must_use]
    pub fn with_recovery(mut self, suggestion: impl Into<String>, hints: Vec<String>) -> Self {
        self.recovery = Some(Recovery {
            suggestion: suggestion.into(),
            hints,
        });
        self
    }

    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl std::fmt::Display for CeeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.code.as_str(), self.code.http_status(), self.message)
    }
}

impl std::error::Error for CeeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::EngineInfo;
    use crate::{CorrelationId, RequestId};

    fn trace() -> Trace {
        Trace::new(
            RequestId::new("req-1"),
            CorrelationId::new("corr-1"),
            EngineInfo::new("anthropic", "claude"),
        )
    }

    #[test]
    fn retryability_matches_taxonomy_table() {
        assert!(!CeeErrorCode::CeeValidationFailed.retryable());
        assert!(!CeeErrorCode::CeeLlmValidationFailed.retryable());
        assert!(!CeeErrorCode::CeeGraphInvalid.retryable());
        assert!(CeeErrorCode::CeeRateLimit.retryable());
        assert!(CeeErrorCode::CeeLlmUpstreamError.retryable());
        assert!(CeeErrorCode::CeeServiceUnavailable.retryable());
        assert!(CeeErrorCode::CeeLlmTimeout.retryable());
        assert!(!CeeErrorCode::CeeInternalError.retryable());
    }

    #[test]
    fn http_status_matches_taxonomy_table() {
        assert_eq!(CeeErrorCode::CeeValidationFailed.http_status(), 400);
        assert_eq!(CeeErrorCode::CeeRateLimit.http_status(), 429);
        assert_eq!(CeeErrorCode::CeeLlmUpstreamError.http_status(), 502);
        assert_eq!(CeeErrorCode::CeeServiceUnavailable.http_status(), 503);
        assert_eq!(CeeErrorCode::CeeLlmTimeout.http_status(), 504);
        assert_eq!(CeeErrorCode::CeeInternalError.http_status(), 500);
    }

    #[test]
    fn serializes_with_cee_error_v1_schema() {
        let err = CeeError::new(CeeErrorCode::CeeGraphInvalid, "bad graph", trace())
            .with_recovery("simplify the brief", vec!["remove cycles".to_string()]);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["schema"], "cee.error.v1");
        assert_eq!(json["code"], "CEE_GRAPH_INVALID");
        assert_eq!(json["retryable"], false);
        assert!(json["recovery"]["hints"].is_array());
    }
}
