//! Tracks active streams and serves the resume handshake.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;

use cee_utils::ids::RequestId;

use crate::buffer::StreamBuffer;
use crate::error::ResumeFailure;
use crate::event::StreamEvent;
use crate::token::ResumeToken;

struct Entry {
    buffer: Arc<StreamBuffer>,
    last_activity_ms: u64,
}

/// Replay-only vs live-follow resume ( endpoints table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeMode {
    ReplayOnly,
    Live,
}

/// What a successful resume hands the caller: buffered catch-up events,
/// plus (in live mode) a subscription for events produced afterward.
pub struct ResumeOutcome {
    pub replayed: Vec<StreamEvent>,
    pub live: Option<broadcast::Receiver<StreamEvent>>,
}

/// Process-local registry of active streams, keyed by request id.
#[derive(Default)]
pub struct StreamRegistry {
    streams: DashMap<RequestId, Entry>,
}

impl StreamRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { streams: DashMap::new() }
    }

    /// Register a freshly opened stream's buffer.
    pub fn open(&self, request_id: RequestId, buffer: Arc<StreamBuffer>, now_ms: u64) {
        self.streams.insert(request_id, Entry { buffer, last_activity_ms: now_ms });
    }

    #[must_use]
    pub fn get(&self, request_id: &RequestId) -> Option<Arc<StreamBuffer>> {
        self.streams.get(request_id).map(|e| Arc::clone(&e.buffer))
    }

    pub fn touch(&self, request_id: &RequestId, now_ms: u64) {
        if let Some(mut entry) = self.streams.get_mut(request_id) {
            entry.last_activity_ms = now_ms;
        }
    }

    /// Drop streams idle for longer than `idle_ms` — terminated streams
    /// or ones that have gone quiet past the idle-expiry bound.
    pub fn purge_expired(&self, now_ms: u64, idle_ms: u64) {
        self.streams.retain(|_, entry| now_ms.saturating_sub(entry.last_activity_ms) <= idle_ms);
    }

    /// Resolve a resume handshake: verify the token, locate its stream
    /// (426 if gone/unknown), replay everything after `token.seq`, and —
    /// in live mode — attach a follower subscription.
    pub fn resume(&self, raw_token: &str, secret: &[u8], mode: ResumeMode, now_ms: u64) -> Result<ResumeOutcome, ResumeFailure> {
        let token = ResumeToken::decode(raw_token, secret)?;

        let Some(entry) = self.streams.get(&token.request_id) else {
            return Err(ResumeFailure::UnknownStream);
        };
        let buffer = Arc::clone(&entry.buffer);
        drop(entry);

        self.touch(&token.request_id, now_ms);

        // Subscribe before snapshotting the buffer. An event appended between
        // the two can then only land in one place: either it's already in the
        // vector by the time we read it (so `replay_from` sees it), or it's
        // still in flight and lands in the subscription's queue (so we drain
        // it below) — never neither, and never both without the dedup pass.
        let mut live = match mode {
            ResumeMode::Live if !buffer.is_terminal() => Some(buffer.subscribe()),
            _ => None,
        };

        let mut replayed = buffer.replay_from(token.seq);
        let max_replayed_seq = replayed.last().map_or(token.seq, StreamEvent::seq);

        if let Some(rx) = live.as_mut() {
            let mut caught_in_the_gap = Vec::new();
            while let Ok(event) = rx.try_recv() {
                caught_in_the_gap.push(event);
            }
            caught_in_the_gap.retain(|e| e.seq() > max_replayed_seq);
            replayed.extend(caught_in_the_gap);
            replayed.sort_by_key(StreamEvent::seq);
        }

        Ok(ResumeOutcome { replayed, live })
    }
}
