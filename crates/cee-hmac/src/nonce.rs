//! Nonce replay protection ("HMAC nonce storage must support
//! TTL expiry and guarantee at-most-one acceptance per nonce within the
//! clock-skew window").

use dashmap::DashMap;

/// Accepts or rejects a nonce for a given request timestamp. `try_accept`
/// must guarantee at-most-one acceptance per nonce within `window_ms` of its
/// first acceptance; everything older than that window is free to expire.
pub trait NonceStore: Send + Sync {
    /// Attempt to accept `nonce` as unused at `now_ms`. Returns `true` the
    /// first time a given nonce is accepted within its retention window,
    /// `false` on any subsequent attempt (a replay).
    fn try_accept(&self, nonce: &str, now_ms: u64, window_ms: u64) -> bool;

    /// Drop entries older than `window_ms` relative to `now_ms`. Callers
    /// that hold a store across many requests should call this
    /// periodically to bound memory growth; `try_accept` does not do this
    /// itself, since a per-call sweep would make a single hot nonce
    /// responsible for sweeping everyone else's expired entries.
    fn purge_expired(&self, now_ms: u64, window_ms: u64);
}

/// A process-local, `dashmap`-backed nonce store. Suitable for a single
/// instance; a multi-instance deployment needs a shared store behind the
/// same trait (e.g. backed by a cache service) — an external collaborator
/// this crate doesn't provide.
#[derive(Debug, Default)]
pub struct InMemoryNonceStore {
    seen: DashMap<String, u64>,
}

impl InMemoryNonceStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            seen: DashMap::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl NonceStore for InMemoryNonceStore {
    fn try_accept(&self, nonce: &str, now_ms: u64, window_ms: u64) -> bool {
        use dashmap::mapref::entry::Entry;

        match self.seen.entry(nonce.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(now_ms);
                true
            }
            Entry::Occupied(mut slot) => {
                let first_seen = *slot.get();
                if now_ms.saturating_sub(first_seen) > window_ms {
                    slot.insert(now_ms);
                    true
                } else {
                    false
                }
            }
        }
    }

    fn purge_expired(&self, now_ms: u64, window_ms: u64) {
        self.seen
            .retain(|_, first_seen| now_ms.saturating_sub(*first_seen) <= window_ms);
    }
}
