//! Rate-limit admission telemetry.

pub fn exceeded(feature: &str, key: &str, retry_after_seconds: u64) {
    tracing::warn!(
        event = "ratelimit.exceeded",
        feature,
        key,
        retry_after_seconds,
        "per-feature request budget exceeded"
    );
}
