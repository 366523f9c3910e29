//! Per-stream ordered event buffer.
//!
//! Single-writer (the producer), multiple-reader (resumers). Producing an
//! event appends to the buffer and notifies any attached live followers; a
//! resume handshake replays from the buffer, then — in live mode — follows
//! new appends via the same notify.

use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::event::StreamEvent;

const LIVE_FOLLOW_CAPACITY: usize = 256;

/// An active stream's event log plus its live-follow broadcast channel.
pub struct StreamBuffer {
    events: Mutex<Vec<StreamEvent>>,
    live: broadcast::Sender<StreamEvent>,
    terminal: Mutex<bool>,
}

impl StreamBuffer {
    #[must_use]
    pub fn new() -> Self {
        let (live, _) = broadcast::channel(LIVE_FOLLOW_CAPACITY);
        Self { events: Mutex::new(Vec::new()), live, terminal: Mutex::new(false) }
    }

    /// Append a non-heartbeat event, in order. Sets the terminal flag when
    /// `event.is_terminal `; no further events should be appended after
    /// that (the caller owns that invariant).
    pub fn push(&self, event: StreamEvent) {
        if event.is_terminal() {
            *self.terminal.lock().unwrap() = true;
        }
        let _ = self.live.send(event.clone());
        self.events.lock().unwrap().push(event);
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        *self.terminal.lock().unwrap()
    }

    /// All buffered events with `seq > after_seq`, in order.
    #[must_use]
    pub fn replay_from(&self, after_seq: u64) -> Vec<StreamEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.seq() > after_seq)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn latest_seq(&self) -> u64 {
        self.events.lock().unwrap().last().map_or(0, StreamEvent::seq)
    }

    /// Subscribe to events appended after this call, for live-mode follow.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StreamEvent> {
        self.live.subscribe()
    }
}

impl Default for StreamBuffer {
    fn default() -> Self {
        Self::new()
    }
}
