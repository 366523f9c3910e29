//! Failover telemetry events.

use cee_llm::LlmError;

pub fn failover(from: &str, to: &str, reason: &LlmError) {
    tracing::warn!(
        event = "provider.failover",
        from,
        to,
        reason = %reason,
        "failing over to next provider"
    );
}

pub fn failover_success(primary: &str, chosen: &str, failed: &[(String, LlmError)]) {
    let failed_providers: Vec<&str> = failed.iter().map(|(name, _)| name.as_str()).collect();
    tracing::info!(
        event = "provider.failover.success",
        primary,
        chosen,
        failed = ?failed_providers,
        "failover succeeded"
    );
}

pub fn failover_exhausted(failed: &[(String, LlmError)]) {
    let failed_providers: Vec<&str> = failed.iter().map(|(name, _)| name.as_str()).collect();
    tracing::error!(
        event = "provider.failover.exhausted",
        failed = ?failed_providers,
        "all providers exhausted"
    );
}
