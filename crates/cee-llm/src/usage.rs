use serde::{Deserialize, Serialize};

/// Token accounting returned with every call as `usage`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_creation_input_tokens: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_read_input_tokens: Option<u64>,
}

/// Optional observability metadata. None of these are required
/// for correctness; they ride along for tracing/telemetry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_latency_ms: Option<u64>,
}

/// Unsafe diagnostic payload, only ever populated when a [`crate::CallOpts`]
/// collector is attached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallDiagnostics {
    pub raw_text: Option<String>,
    pub raw_json: Option<serde_json::Value>,
}

/// The envelope every [`crate::LlmAdapter`] call returns around its
/// capability-specific payload `T`.
#[derive(Debug, Clone)]
pub struct CallResult<T> {
    pub data: T,
    pub usage: Usage,
    pub metadata: CallMetadata,
    pub diagnostics: Option<CallDiagnostics>,
}

impl<T> CallResult<T> {
    #[must_use]
    pub fn new(data: T, usage: Usage) -> Self {
        Self {
            data,
            usage,
            metadata: CallMetadata::default(),
            diagnostics: None,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: CallMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: CallDiagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }
}
