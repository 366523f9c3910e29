//! Telemetry events for the prompt cache. No sink is
//! bound here — events go through `tracing` and it's up to the caller's
//! subscriber to route them anywhere.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMissReason {
    NotCached,
    Expired,
}

impl CacheMissReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotCached => "not_cached",
            Self::Expired => "expired",
        }
    }
}

pub fn cache_hit(task_id: &str) {
    tracing::debug!(event = "cache_hit", task_id, "prompt cache hit");
}

pub fn cache_miss(task_id: &str, reason: CacheMissReason) {
    tracing::debug!(
        event = "cache_miss",
        task_id,
        reason = reason.as_str(),
        "prompt cache miss"
    );
}

pub fn background_refresh(task_id: &str, succeeded: bool) {
    tracing::debug!(
        event = "background_refresh",
        task_id,
        succeeded,
        "prompt background refresh completed"
    );
}

pub fn experiment_assignment(task_id: &str, experiment: &str, version: &str, forced: bool) {
    tracing::info!(
        event = "experiment_assignment",
        task_id,
        experiment,
        version,
        forced,
        "experiment treatment assigned"
    );
}

pub fn staging_used(task_id: &str, version: &str) {
    tracing::info!(
        event = "staging_used",
        task_id,
        version,
        "staging version served"
    );
}
