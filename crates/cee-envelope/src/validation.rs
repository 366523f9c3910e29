use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Warning,
}

/// An observable-degradation notice attached to a response:
/// `ENGINE_DEGRADED` and `CEE_REPRO_MISMATCH` both carry `severity:
/// warning` rather than failing the request outright.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub code: String,
    pub severity: IssueSeverity,
    pub message: String,
}

impl ValidationIssue {
    #[must_use]
    pub fn engine_degraded(signal: &str) -> Self {
        Self {
            code: "ENGINE_DEGRADED".to_string(),
            severity: IssueSeverity::Warning,
            message: format!("upstream engine reported a degraded signal: {signal}"),
        }
    }

    #[must_use]
    pub fn repro_mismatch() -> Self {
        Self {
            code: "CEE_REPRO_MISMATCH".to_string(),
            severity: IssueSeverity::Warning,
            message: "re-running with the same seed produced a different graph".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_degraded_carries_the_signal_in_its_message() {
        let issue = ValidationIssue::engine_degraded("rate_limited_fallback_model");
        assert_eq!(issue.code, "ENGINE_DEGRADED");
        assert!(issue.message.contains("rate_limited_fallback_model"));
    }

    #[test]
    fn repro_mismatch_has_a_stable_code() {
        assert_eq!(ValidationIssue::repro_mismatch().code, "CEE_REPRO_MISMATCH");
    }
}
