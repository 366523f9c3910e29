use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptCacheError {
    #[error("no prompt registered for task '{task_id}' and the store did not supply one")]
    NoDefaultRegistered { task_id: String },

    #[error("prompt store failed for task '{task_id}': {reason}")]
    StoreFailure { task_id: String, reason: String },
}
