use cee_llm::LlmError;
use thiserror::Error;

/// The aggregate error raised when every adapter in the failover chain has
/// failed ("raise an aggregate error carrying every underlying
/// error").
#[derive(Debug, Error)]
pub enum FailoverError {
    #[error("no adapters were configured")]
    NoAdapters,

    #[error("all {count} adapter(s) failed: {}", summarize(errors))]
    AllProvidersFailed {
        count: usize,
        errors: Vec<(String, LlmError)>,
    },

    #[error("the primary adapter '{provider}' does not support streaming")]
    StreamingUnsupported { provider: String },
}

fn summarize(errors: &[(String, LlmError)]) -> String {
    errors
        .iter()
        .map(|(name, err)| format!("{name}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl FailoverError {
    #[must_use]
    pub fn all_failed(errors: Vec<(String, LlmError)>) -> Self {
        Self::AllProvidersFailed {
            count: errors.len(),
            errors,
        }
    }
}
