use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use cee_prompt::{Experiment, Prompt, PromptVersion};

use crate::error::PromptCacheError;

/// The backing store for prompt content ("persistence backends for
/// prompt storage" — deliberately out of scope as a concrete
/// implementation). `cee-prompt-cache` only needs the read surface.
#[async_trait]
pub trait PromptSource: Send + Sync {
    async fn fetch_active(&self, task_id: &str) -> Result<PromptVersion, PromptCacheError>;

    async fn fetch_version(
        &self,
        task_id: &str,
        version: &str,
    ) -> Result<PromptVersion, PromptCacheError>;

    async fn fetch_staging(&self, task_id: &str) -> Result<Option<PromptVersion>, PromptCacheError>;

    async fn experiment_for(&self, task_id: &str) -> Option<Experiment>;
}

/// A reference in-memory store, useful for tests and for callers who don't
/// need a real backend yet.
#[derive(Debug, Default)]
pub struct InMemoryPromptSource {
    prompts: RwLock<HashMap<String, Prompt>>,
    experiments: RwLock<HashMap<String, Experiment>>,
    /// When set for a task id, `fetch_active`/`fetch_version`/`fetch_staging`
    /// fail for it — used to exercise the cache's fallback-to-default path.
    failing_tasks: RwLock<HashMap<String, String>>,
}

impl InMemoryPromptSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_prompt(&self, prompt: Prompt) {
        self.prompts
            .write()
            .expect("prompt source lock poisoned")
            .insert(prompt.task_id.clone(), prompt);
    }

    pub fn register_experiment(&self, experiment: Experiment) {
        self.experiments
            .write()
            .expect("prompt source lock poisoned")
            .insert(experiment.task_id.clone(), experiment);
    }

    pub fn fail_task(&self, task_id: impl Into<String>, reason: impl Into<String>) {
        self.failing_tasks
            .write()
            .expect("prompt source lock poisoned")
            .insert(task_id.into(), reason.into());
    }

    fn check_failure(&self, task_id: &str) -> Result<(), PromptCacheError> {
        if let Some(reason) = self
            .failing_tasks
            .read()
            .expect("prompt source lock poisoned")
            .get(task_id)
        {
            return Err(PromptCacheError::StoreFailure {
                task_id: task_id.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PromptSource for InMemoryPromptSource {
    async fn fetch_active(&self, task_id: &str) -> Result<PromptVersion, PromptCacheError> {
        self.check_failure(task_id)?;
        self.prompts
            .read()
            .expect("prompt source lock poisoned")
            .get(task_id)
            .and_then(|p| p.active().cloned())
            .ok_or_else(|| PromptCacheError::NoDefaultRegistered {
                task_id: task_id.to_string(),
            })
    }

    async fn fetch_version(
        &self,
        task_id: &str,
        version: &str,
    ) -> Result<PromptVersion, PromptCacheError> {
        self.check_failure(task_id)?;
        self.prompts
            .read()
            .expect("prompt source lock poisoned")
            .get(task_id)
            .and_then(|p| p.version(version).cloned())
            .ok_or_else(|| PromptCacheError::NoDefaultRegistered {
                task_id: task_id.to_string(),
            })
    }

    async fn fetch_staging(&self, task_id: &str) -> Result<Option<PromptVersion>, PromptCacheError> {
        self.check_failure(task_id)?;
        Ok(self
            .prompts
            .read()
            .expect("prompt source lock poisoned")
            .get(task_id)
            .and_then(|p| p.staging().cloned()))
    }

    async fn experiment_for(&self, task_id: &str) -> Option<Experiment> {
        self.experiments
            .read()
            .expect("prompt source lock poisoned")
            .get(task_id)
            .cloned()
    }
}
