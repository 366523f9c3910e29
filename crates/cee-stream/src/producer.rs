//! Drives a stream's ordered event sequence into its buffer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cee_utils::ids::RequestId;

use crate::buffer::StreamBuffer;
use crate::event::StreamEvent;
use crate::token::ResumeToken;

/// Assigns monotonically increasing sequence numbers and pushes events to
/// a stream's buffer. Event 1 is always the `resume` event carrying this
/// stream's signed token.
pub struct StreamProducer {
    buffer: Arc<StreamBuffer>,
    request_id: RequestId,
    step: String,
    secret: Vec<u8>,
    next_seq: AtomicU64,
}

impl StreamProducer {
    #[must_use]
    pub fn open(buffer: Arc<StreamBuffer>, request_id: RequestId, step: impl Into<String>, secret: Vec<u8>) -> Self {
        let producer = Self { buffer, request_id, step: step.into(), secret, next_seq: AtomicU64::new(1) };
        producer.emit_resume();
        producer
    }

    fn emit_resume(&self) {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let token = ResumeToken::new(self.request_id.clone(), self.step.clone(), seq).encode(&self.secret);
        self.buffer.push(StreamEvent::Resume { seq, token });
    }

    /// Emit a `stage` event and return its assigned seq.
    pub fn emit_stage(&self, stage: impl Into<String>, payload: Option<serde_json::Value>) -> u64 {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.buffer.push(StreamEvent::Stage { seq, stage: stage.into(), payload });
        seq
    }

    /// Emit the terminal `complete` event.
    pub fn emit_complete(&self) -> u64 {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.buffer.push(StreamEvent::Complete { seq });
        seq
    }
}
