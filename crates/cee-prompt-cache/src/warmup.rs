use std::sync::Arc;
use std::time::Instant;

use crate::cache::PromptCache;

/// Cache-warming report ("Cache-warming at startup reports
/// `{warmed, failed, skipped, usedStaging}`").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarmupStats {
    pub warmed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub used_staging: usize,
}

impl PromptCache {
    /// Eagerly populate the cache for `task_ids`, typically called once at
    /// startup. `skipped` counts tasks with neither a store entry nor a
    /// registered default.
    pub async fn warm_up(self: &Arc<Self>, task_ids: &[String]) -> WarmupStats {
        let mut stats = WarmupStats::default();

        for task_id in task_ids {
            match self.source.fetch_active(task_id).await {
                Ok(version) => {
                    self.cache.insert(
                        task_id.clone(),
                        crate::cache::CachedEntry {
                            version,
                            cached_at: Instant::now(),
                        },
                    );
                    stats.warmed += 1;

                    if let Ok(Some(_staging)) = self.source.fetch_staging(task_id).await {
                        stats.used_staging += 1;
                    }
                }
                Err(_) if self.registered_default(task_id).is_some() => {
                    stats.skipped += 1;
                }
                Err(_) => {
                    stats.failed += 1;
                }
            }
        }

        stats
    }
}
