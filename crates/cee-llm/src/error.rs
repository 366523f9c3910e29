use std::time::Duration;

use thiserror::Error;

/// Errors an [`crate::LlmAdapter`] call can fail with. The retryability
/// classification an error implies for failover purposes lives
/// in `cee-failover`, which maps each variant onto retryable/non-retryable.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider authentication error: {0}")]
    ProviderAuth(String),

    #[error("provider quota exceeded: {0}")]
    ProviderQuota(String),

    #[error("provider outage: {0}")]
    ProviderOutage(String),

    #[error("timed out after {duration:?}")]
    Timeout { duration: Duration },

    #[error("upstream response was not valid JSON")]
    NonJsonResponse,

    #[error("upstream response was empty")]
    EmptyResponse,

    #[error("upstream response failed schema validation: {reason}")]
    InvalidSchema { reason: String },

    #[error("upstream response is missing the expected result field")]
    MissingResult,

    #[error("graph exceeds size caps: {count} {kind} exceeds the cap of {cap}")]
    SizeCapExceeded {
        kind: &'static str,
        count: usize,
        cap: usize,
    },

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("misconfiguration: {0}")]
    Misconfiguration(String),
}

impl LlmError {
    /// Whether this failure is, in principle, worth retrying against the
    /// same provider (distinct from failover retryability across
    /// providers, which `cee-failover` computes separately).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::ProviderOutage(_) | Self::Timeout { .. }
        )
    }
}
