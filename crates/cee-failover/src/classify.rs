use cee_llm::LlmError;

/// Retryability classification for failover purposes: network
/// errors, timeouts, 5xx, and 429 are retryable; 4xx other than 429 are
/// not. Validation-shaped failures (bad/empty/non-JSON response) are
/// treated as 4xx-equivalent — they indicate the upstream gave a
/// deterministically unusable answer, and another provider facing the same
/// prompt is unlikely to do better, so failing over wastes a round trip.
#[must_use]
pub fn is_retryable_for_failover(error: &LlmError) -> bool {
    matches!(
        error,
        LlmError::Transport(_) | LlmError::Timeout { .. } | LlmError::ProviderOutage(_) | LlmError::ProviderQuota(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn network_and_timeout_and_outage_and_quota_are_retryable() {
        assert!(is_retryable_for_failover(&LlmError::Transport("x".into())));
        assert!(is_retryable_for_failover(&LlmError::Timeout {
            duration: Duration::from_secs(1)
        }));
        assert!(is_retryable_for_failover(&LlmError::ProviderOutage("x".into())));
        assert!(is_retryable_for_failover(&LlmError::ProviderQuota("x".into())));
    }

    #[test]
    fn auth_and_validation_failures_are_not_retryable() {
        assert!(!is_retryable_for_failover(&LlmError::ProviderAuth("x".into())));
        assert!(!is_retryable_for_failover(&LlmError::NonJsonResponse));
        assert!(!is_retryable_for_failover(&LlmError::EmptyResponse));
        assert!(!is_retryable_for_failover(&LlmError::InvalidSchema {
            reason: "x".into()
        }));
        assert!(!is_retryable_for_failover(&LlmError::MissingResult));
    }
}
