//! Per-feature, per-key rate limiting.
//!
//! Budgets are fixed one-minute windows: each `(feature, key)` pair gets an
//! independent counter that resets at the minute boundary rather than
//! sliding. Feature RPM values are a caller concern (typically resolved via
//! `cee_config::Config::rate_limit_rpm_for`); this crate only tracks usage
//! and renders the admission decision.

mod telemetry;
mod window;

pub use window::{RateLimitExceeded, WindowCounters, WINDOW_MS};

use cee_utils::error::{CeeError, CeeErrorCode};
use cee_utils::trace::Trace;

/// RPM used when a feature has no configured override.
pub const DEFAULT_RATE_LIMIT_RPM: u32 = 60;

/// Admits or rejects requests against per-feature, per-key RPM budgets.
#[derive(Debug, Default)]
pub struct RateLimiter {
    counters: WindowCounters,
}

impl RateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self { counters: WindowCounters::new() }
    }

    /// Record one request for `feature`/`key` at `now_ms`. On budget
    /// exhaustion, emits telemetry and returns `Err` with the
    /// retry-after-seconds the caller should surface as both the
    /// `retry-after` header and `details.retry_after_seconds`.
    pub fn admit(&self, feature: &str, key: &str, rpm: u32, now_ms: u64) -> Result<(), RateLimitExceeded> {
        let result = self.counters.record(feature, key, rpm, now_ms);
        if let Err(exceeded) = result {
            telemetry::exceeded(feature, key, exceeded.retry_after_seconds);
        }
        result
    }
}

/// Render a [`RateLimitExceeded`] as the wire-shaped `CEE_RATE_LIMIT` error.
#[must_use]
pub fn into_cee_error(exceeded: RateLimitExceeded, trace: Trace) -> CeeError {
    CeeError::new(CeeErrorCode::CeeRateLimit, "per-feature request budget exceeded", trace)
        .with_details(serde_json::json!({ "retry_after_seconds": exceeded.retry_after_seconds }))
}
