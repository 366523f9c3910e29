//! The client side's explicit iterator type: `next()`/`close()` for
//! cleanup, with an abort channel, in place of an async iterable.
//!
//! [`ReconnectingStream`] wraps a [`StreamTransport`] (the actual
//! HTTP/SSE plumbing, supplied by the host application) and drives the
//! [`Reconnector`] decision logic across underlying connection failures.

use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio_stream::{Stream, StreamExt};

use crate::event::StreamEvent;
use crate::reconnector::{FailureKind, Reconnector};
use crate::registry::ResumeMode;

pub type BoxStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

/// What a transport attempt yielded: either a connected event stream or a
/// retryable failure with an optional server-supplied retry-after.
pub enum ConnectOutcome {
    Connected(BoxStream<StreamEvent>),
    Failed { kind: FailureKind, retry_after_seconds: Option<u64> },
}

/// The actual HTTP/SSE plumbing `ReconnectingStream` drives. Implementors
/// own connection setup/teardown; this crate only decides *when* to call
/// which method.
#[async_trait]
pub trait StreamTransport: Send + Sync {
    async fn open_stream(&self) -> ConnectOutcome;
    async fn resume(&self, token: &str, mode: ResumeMode) -> ConnectOutcome;

    /// 401/426 rejection of a resume attempt; distinct from
    /// [`ConnectOutcome::Failed`] since it carries the HTTP status the
    /// reconnector needs for token invalidation.
    async fn resume_rejected_status(&self, token: &str, mode: ResumeMode) -> Option<u16>;
}

/// Shared abort flag; cloning gives the caller a handle to cancel an
/// in-flight [`ReconnectingStream`] from another task.
#[derive(Clone, Default)]
pub struct AbortHandle(Arc<AtomicBool>);

impl AbortHandle {
    pub fn abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// An explicit iterator over a (possibly reconnecting) SSE stream. Callers
/// drive it with [`Self::next`]; [`Self::close`] (or dropping it) releases
/// the underlying connection on every exit path, including errors.
pub struct ReconnectingStream<T: StreamTransport> {
    transport: T,
    reconnector: Reconnector,
    inner: Option<BoxStream<StreamEvent>>,
    abort: AbortHandle,
    terminal_seen: bool,
}

impl<T: StreamTransport> ReconnectingStream<T> {
    #[must_use]
    pub fn new(transport: T, prefer_live: bool) -> Self {
        Self {
            transport,
            reconnector: Reconnector::new(prefer_live),
            inner: None,
            abort: AbortHandle::default(),
            terminal_seen: false,
        }
    }

    #[must_use]
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.terminal_seen
    }

    /// Release the underlying connection without reporting a further
    /// event. Safe to call more than once.
    pub fn close(&mut self) {
        self.inner = None;
    }

    /// Yield the next event, reconnecting across retryable failures per
    /// the schedule in [`crate::reconnector`]. Returns `None` on abort, on
    /// terminal-event completion, or once retries are exhausted.
    pub async fn next(&mut self) -> Option<StreamEvent> {
        loop {
            if self.abort.is_aborted() || self.terminal_seen {
                self.close();
                return None;
            }

            if self.inner.is_none() {
                match self.connect().await {
                    Some(stream) => self.inner = Some(stream),
                    None => {
                        self.close();
                        return None;
                    }
                }
            }

            let Some(stream) = self.inner.as_mut() else {
                return None;
            };

            match stream.next().await {
                Some(event) => {
                    self.reconnector.capture(&event);
                    if event.is_terminal() {
                        self.terminal_seen = true;
                        self.close();
                    }
                    return Some(event);
                }
                None => {
                    // Underlying source ended without a terminal event:
                    // treat as a dropped connection and retry.
                    self.close();
                    match self.reconnector.on_failure(FailureKind::Network, None) {
                        Some((_, delay)) => {
                            crate::telemetry::reconnect_scheduled(self.reconnector.attempts(), delay);
                            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
                        }
                        None => return None,
                    }
                }
            }
        }
    }

    async fn connect(&mut self) -> Option<BoxStream<StreamEvent>> {
        if self.abort.is_aborted() {
            return None;
        }

        if let Some(token) = self.reconnector.held_token().map(str::to_string) {
            let mode = if self.reconnector.prefers_live() { ResumeMode::Live } else { ResumeMode::ReplayOnly };
            if let Some(status) = self.transport.resume_rejected_status(&token, mode).await {
                self.reconnector.on_resume_rejected(status);
                crate::telemetry::resume_rejected(&token[..token.len().min(8)], status);
                return self.open_fresh().await;
            }
            return match self.transport.resume(&token, mode).await {
                ConnectOutcome::Connected(stream) => Some(stream),
                ConnectOutcome::Failed { .. } => None,
            };
        }

        self.open_fresh().await
    }

    async fn open_fresh(&mut self) -> Option<BoxStream<StreamEvent>> {
        match self.transport.open_stream().await {
            ConnectOutcome::Connected(stream) => Some(stream),
            ConnectOutcome::Failed { .. } => None,
        }
    }
}

impl<T: StreamTransport> Drop for ReconnectingStream<T> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn stage(seq: u64, stage: &str) -> StreamEvent {
        StreamEvent::Stage { seq, stage: stage.to_string(), payload: None }
    }

    /// Opens once, yielding a resume event then two stages then complete.
    struct SingleShotTransport;

    #[async_trait]
    impl StreamTransport for SingleShotTransport {
        async fn open_stream(&self) -> ConnectOutcome {
            let events = vec![
                StreamEvent::Resume { seq: 1, token: "tok-1".to_string() },
                stage(2, "DRAFTING"),
                StreamEvent::Stage { seq: 3, stage: "COMPLETE".to_string(), payload: None },
            ];
            ConnectOutcome::Connected(Box::pin(tokio_stream::iter(events)))
        }

        async fn resume(&self, _token: &str, _mode: ResumeMode) -> ConnectOutcome {
            ConnectOutcome::Connected(Box::pin(tokio_stream::iter(Vec::new())))
        }

        async fn resume_rejected_status(&self, _token: &str, _mode: ResumeMode) -> Option<u16> {
            None
        }
    }

    #[tokio::test]
    async fn yields_every_event_then_stops_at_the_terminal_one() {
        let mut stream = ReconnectingStream::new(SingleShotTransport, true);

        let first = stream.next().await.unwrap();
        assert!(matches!(first, StreamEvent::Resume { .. }));
        assert_eq!(stream.next().await.unwrap().seq(), 2);

        let last = stream.next().await.unwrap();
        assert!(last.is_terminal());
        assert!(stream.is_terminal());

        assert!(stream.next().await.is_none());
    }

    /// Opens once, drops the connection without a terminal event, then
    /// serves a replay-only resume that completes.
    struct ReconnectingTransport {
        resumes: AtomicU32,
    }

    #[async_trait]
    impl StreamTransport for ReconnectingTransport {
        async fn open_stream(&self) -> ConnectOutcome {
            let events = vec![StreamEvent::Resume { seq: 1, token: "tok-1".to_string() }, stage(2, "DRAFTING")];
            ConnectOutcome::Connected(Box::pin(tokio_stream::iter(events)))
        }

        async fn resume(&self, _token: &str, _mode: ResumeMode) -> ConnectOutcome {
            self.resumes.fetch_add(1, Ordering::SeqCst);
            let events = vec![StreamEvent::Complete { seq: 3 }];
            ConnectOutcome::Connected(Box::pin(tokio_stream::iter(events)))
        }

        async fn resume_rejected_status(&self, _token: &str, _mode: ResumeMode) -> Option<u16> {
            None
        }
    }

    #[tokio::test]
    async fn a_dropped_connection_reconnects_via_resume_and_reaches_terminal() {
        let mut stream = ReconnectingStream::new(ReconnectingTransport { resumes: AtomicU32::new(0) }, false);

        assert!(matches!(stream.next().await.unwrap(), StreamEvent::Resume { .. }));
        assert_eq!(stream.next().await.unwrap().seq(), 2);

        let resumed = stream.next().await.unwrap();
        assert!(resumed.is_terminal());
        assert_eq!(stream.transport.resumes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn aborting_stops_the_stream_immediately() {
        let mut stream = ReconnectingStream::new(SingleShotTransport, true);
        let handle = stream.abort_handle();
        handle.abort();

        assert!(stream.next().await.is_none());
    }
}
