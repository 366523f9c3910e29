//! Trace/engine metadata attached to every response.

use serde::{Deserialize, Serialize};

use crate::ids::{CorrelationId, RequestId};

/// Identifies the upstream provider/model that actually served a request, and
/// whether it reported a degraded mode (the `X-Olumi-Degraded`
/// header or equivalent signal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineInfo {
    pub provider: String,
    pub model: String,
    /// `Some(signal)` when the upstream reported degradation. Any non-empty
    /// signal string counts as degraded; the string itself is preserved
    /// for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<String>,
}

impl EngineInfo {
    #[must_use]
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            degraded: None,
        }
    }

    #[must_use]
    pub fn with_degraded(mut self, signal: impl Into<String>) -> Self {
        self.degraded = Some(signal.into());
        self
    }

    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

/// Carried on every response body: success or error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    pub request_id: RequestId,
    pub correlation_id: CorrelationId,
    pub engine: EngineInfo,
}

impl Trace {
    #[must_use]
    pub fn new(request_id: RequestId, correlation_id: CorrelationId, engine: EngineInfo) -> Self {
        Self {
            request_id,
            correlation_id,
            engine,
        }
    }
}
