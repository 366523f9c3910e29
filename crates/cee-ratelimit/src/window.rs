//! Fixed one-minute window counters.

use dashmap::DashMap;

pub const WINDOW_MS: u64 = 60_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    start_ms: u64,
    count: u32,
}

/// Exceeding a feature/key's RPM budget within the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitExceeded {
    pub retry_after_seconds: u64,
}

/// Per-`(feature, key)` fixed-window counters. A window is identified by
/// the floor of `now_ms` to the nearest `WINDOW_MS` boundary; a request
/// that lands in a new window resets the counter rather than sliding it.
#[derive(Debug, Default)]
pub struct WindowCounters {
    windows: DashMap<(String, String), Window>,
}

impl WindowCounters {
    #[must_use]
    pub fn new() -> Self {
        Self { windows: DashMap::new() }
    }

    /// Record one request for `(feature, key)` at `now_ms` against `rpm`.
    /// Returns the exceeded budget's retry-after seconds when this request
    /// pushes the window over `rpm`.
    pub fn record(&self, feature: &str, key: &str, rpm: u32, now_ms: u64) -> Result<(), RateLimitExceeded> {
        let window_start = now_ms - (now_ms % WINDOW_MS);
        let entry_key = (feature.to_string(), key.to_string());

        let count = {
            let mut slot = self.windows.entry(entry_key).or_insert(Window { start_ms: window_start, count: 0 });
            if slot.start_ms != window_start {
                slot.start_ms = window_start;
                slot.count = 0;
            }
            slot.count += 1;
            slot.count
        };

        if count > rpm {
            let retry_after_ms = window_start + WINDOW_MS - now_ms;
            let retry_after_seconds = retry_after_ms.div_ceil(1000);
            return Err(RateLimitExceeded { retry_after_seconds });
        }

        Ok(())
    }
}
