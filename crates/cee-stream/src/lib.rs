//! SSE resume/replay engine and client auto-reconnector.
//!
//! The server side (`StreamRegistry`, `StreamBuffer`, `StreamProducer`,
//! `ResumeToken`) tracks one ordered event sequence per stream and serves
//! replay/live resume handshakes against a signed token. The client side
//! (`Reconnector`) is transport-agnostic: it decides *what* to do next
//! (resume live, resume replay-only, open fresh, stop) and *how long* to
//! wait, leaving the actual HTTP/SSE plumbing to the host application.

mod buffer;
mod client;
mod error;
mod event;
mod producer;
mod reconnector;
mod registry;
mod telemetry;
mod token;

pub use buffer::StreamBuffer;
pub use client::{AbortHandle, BoxStream, ConnectOutcome, ReconnectingStream, StreamTransport};
pub use error::{ResumeErrorBody, ResumeFailure};
pub use event::{heartbeat_sse, StreamEvent};
pub use producer::StreamProducer;
pub use reconnector::{delay_ms, FailureKind, NextAction, Reconnector, BACKOFF_SCHEDULE_MS, DEFAULT_MAX_RETRIES};
pub use registry::{ResumeMode, ResumeOutcome, StreamRegistry};
pub use token::{ResumeToken, TokenError};

pub use telemetry::{
    expired as telemetry_expired, opened as telemetry_opened, reconnect_scheduled as telemetry_reconnect_scheduled,
    resume_rejected as telemetry_resume_rejected, resumed as telemetry_resumed,
};

/// Default idle-expiry bound for an active stream's buffer; see
/// `DESIGN.md` for the rationale.
pub const DEFAULT_IDLE_EXPIRY_MS: u64 = 5 * 60 * 1000;
