use std::sync::Arc;

use cee_utils::ids::RequestId;

/// Cooperative cancellation signal threaded through a call's options.
/// Adapters should poll this between suspension points rather than rely on
/// `Drop`, matching the client-side reconnector's cooperative model.
pub trait AbortSignal: Send + Sync {
    fn is_aborted(&self) -> bool;
}

/// Sink for unsafe diagnostic fields ("raw text, raw JSON ...
/// produced only when explicitly gated"). A `CallOpts` with no collector
/// set means diagnostics are never produced, regardless of what an adapter
/// is capable of emitting.
pub trait DiagnosticsCollector: Send + Sync {
    fn collect_raw_text(&self, text: &str);
    fn collect_raw_json(&self, json: &serde_json::Value);
}

/// Per-call options threaded into every [`crate::LlmAdapter`] method.
#[derive(Clone)]
pub struct CallOpts {
    pub request_id: RequestId,
    pub timeout_ms: u64,
    pub bypass_cache: bool,
    pub abort_signal: Option<Arc<dyn AbortSignal>>,
    pub collector: Option<Arc<dyn DiagnosticsCollector>>,
}

impl CallOpts {
    #[must_use]
    pub fn new(request_id: RequestId, timeout_ms: u64) -> Self {
        Self {
            request_id,
            timeout_ms,
            bypass_cache: false,
            abort_signal: None,
            collector: None,
        }
    }

    #[must_use]
    pub fn with_bypass_cache(mut self, bypass_cache: bool) -> Self {
        self.bypass_cache = bypass_cache;
        self
    }

    #[must_use]
    pub fn with_abort_signal(mut self, signal: Arc<dyn AbortSignal>) -> Self {
        self.abort_signal = Some(signal);
        self
    }

    #[must_use]
    pub fn with_collector(mut self, collector: Arc<dyn DiagnosticsCollector>) -> Self {
        self.collector = Some(collector);
        self
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.abort_signal.as_ref().is_some_and(|s| s.is_aborted())
    }

    /// Emit raw diagnostics if, and only if, a collector is attached (the
    /// gate requires).
    pub fn emit_raw_text(&self, text: &str) {
        if let Some(collector) = &self.collector {
            collector.collect_raw_text(text);
        }
    }

    pub fn emit_raw_json(&self, json: &serde_json::Value) {
        if let Some(collector) = &self.collector {
            collector.collect_raw_json(json);
        }
    }
}
