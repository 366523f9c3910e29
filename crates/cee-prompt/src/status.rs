use serde::{Deserialize, Serialize};

/// Lifecycle state of a [`crate::Prompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptStatus {
    Draft,
    Staging,
    Production,
    Archived,
}
