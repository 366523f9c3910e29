use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cee_utils::hash::sha256_hex;

/// One immutable entry in a prompt's append-only version history. The
/// content hash is over the unsubstituted template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptVersion {
    pub version: String,
    pub content: String,
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}

impl PromptVersion {
    #[must_use]
    pub fn new(version: impl Into<String>, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let content = content.into();
        let content_hash = sha256_hex(&content);
        Self {
            version: version.into(),
            content,
            content_hash,
            created_at,
        }
    }
}
