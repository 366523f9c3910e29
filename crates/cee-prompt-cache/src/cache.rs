use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::{DashMap, DashSet};

use cee_prompt::{interpolate, Assignment, Experiment, PromptVersion};

use crate::context::ResolutionContext;
use crate::error::PromptCacheError;
use crate::source::PromptSource;
use crate::telemetry::{self, CacheMissReason};

/// Sync-path TTL ("an in-process cache with ~60s TTL").
pub const CACHE_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub(crate) struct CachedEntry {
    pub(crate) version: PromptVersion,
    pub(crate) cached_at: Instant,
}

impl CachedEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() < ttl
    }
}

/// Implements the sync and async system-prompt resolution contract.
/// `Arc`-friendly: the sync path spawns a detached background refresh
/// task, so callers should hold this behind an `Arc`.
pub struct PromptCache {
    pub(crate) source: Arc<dyn PromptSource>,
    defaults: HashMap<String, String>,
    ttl: Duration,
    pub(crate) cache: DashMap<String, CachedEntry>,
    refreshing: DashSet<String>,
}

impl PromptCache {
    #[must_use]
    pub fn new(source: Arc<dyn PromptSource>, defaults: HashMap<String, String>) -> Self {
        Self {
            source,
            defaults,
            ttl: CACHE_TTL,
            cache: DashMap::new(),
            refreshing: DashSet::new(),
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub(crate) fn registered_default(&self, task_id: &str) -> Option<String> {
        self.defaults.get(task_id).cloned()
    }

    /// Synchronous resolution: serves from the TTL cache on a
    /// hit; on a miss, returns the registered default immediately and
    /// schedules a single background refresh per task (single-flight).
    pub fn get_system_prompt(
        self: &Arc<Self>,
        operation: &str,
        variables: &HashMap<String, String>,
    ) -> Result<String, PromptCacheError> {
        if let Some(entry) = self.cache.get(operation) {
            if entry.is_fresh(self.ttl) {
                telemetry::cache_hit(operation);
                return Ok(interpolate(&entry.version.content, variables));
            }
            telemetry::cache_miss(operation, CacheMissReason::Expired);
        } else {
            telemetry::cache_miss(operation, CacheMissReason::NotCached);
        }

        self.schedule_background_refresh(operation);

        let default = self
            .registered_default(operation)
            .ok_or_else(|| PromptCacheError::NoDefaultRegistered {
                task_id: operation.to_string(),
            })?;
        Ok(interpolate(&default, variables))
    }

    fn schedule_background_refresh(self: &Arc<Self>, operation: &str) {
        if !self.refreshing.insert(operation.to_string()) {
            return;
        }
        let this = Arc::clone(self);
        let operation = operation.to_string();
        tokio::spawn(async move {
            let result = this.source.fetch_active(&operation).await;
            let succeeded = result.is_ok();
            if let Ok(version) = result {
                this.cache.insert(
                    operation.clone(),
                    CachedEntry {
                        version,
                        cached_at: Instant::now(),
                    },
                );
            }
            telemetry::background_refresh(&operation, succeeded);
            this.refreshing.remove(&operation);
        });
    }

    /// Asynchronous resolution order:
    /// experiment treatment, else active production, else the registered
    /// default on store failure.
    pub async fn get_system_prompt_async(
        &self,
        operation: &str,
        context: &ResolutionContext,
        variables: &HashMap<String, String>,
    ) -> Result<String, PromptCacheError> {
        if let Some(experiment) = self.source.experiment_for(operation).await {
            if let Assignment::Treatment { version, forced } = experiment.assign(context.bucketing_key()) {
                if let Some(resolved) = self.resolve_treatment(operation, &experiment, &version, forced).await {
                    return Ok(interpolate(&resolved, variables));
                }
            }
        }

        match self.source.fetch_active(operation).await {
            Ok(version) => {
                self.cache.insert(
                    operation.to_string(),
                    CachedEntry {
                        version: version.clone(),
                        cached_at: Instant::now(),
                    },
                );
                Ok(interpolate(&version.content, variables))
            }
            Err(_store_failure) => {
                let default = self
                    .registered_default(operation)
                    .ok_or_else(|| PromptCacheError::NoDefaultRegistered {
                        task_id: operation.to_string(),
                    })?;
                Ok(interpolate(&default, variables))
            }
        }
    }

    async fn resolve_treatment(
        &self,
        operation: &str,
        experiment: &Experiment,
        version: &str,
        forced: bool,
    ) -> Option<String> {
        if let Ok(Some(staging)) = self.source.fetch_staging(operation).await {
            if staging.version == version {
                telemetry::staging_used(operation, version);
                telemetry::experiment_assignment(operation, &experiment.name, version, forced);
                return Some(staging.content);
            }
        }

        if let Ok(resolved) = self.source.fetch_version(operation, version).await {
            telemetry::experiment_assignment(operation, &experiment.name, version, forced);
            return Some(resolved.content);
        }

        None
    }

    /// Forcibly invalidate the cached entry for a task, independent of TTL.
    pub fn invalidate(&self, operation: &str) {
        self.cache.remove(operation);
    }
}
