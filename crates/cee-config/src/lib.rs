//! Environment-flag resolution.
//!
//! Precedence-with-attribution style, simplified to this crate's two
//! sources: the environment and the registered default. Tests inject a
//! fake [`EnvReader`] instead of mutating process environment variables,
//! since `std::env::set_var` races across parallel tests.

use std::collections::HashMap;
use std::time::Duration;

/// Where a config value came from; useful for diagnostics/telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Env,
    Default,
}

/// Abstraction over "read an environment variable", so config resolution is
/// testable without racing on process-global env state.
pub trait EnvReader {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads from the real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvReader for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed map, for tests and for callers embedding the service in a host that
/// supplies its own configuration source.
#[derive(Debug, Default, Clone)]
pub struct MapEnv(pub HashMap<String, String>);

impl EnvReader for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Resolved service configuration plus a record of where each value came
/// from ( recognised environment flags).
#[derive(Debug, Clone)]
pub struct Config {
    pub prompts_enabled: bool,
    pub legacy_pipeline_enabled: bool,
    pub evidence_pack_enabled: bool,
    pub llm_failover_providers: Vec<String>,
    pub sse_resume_live_enabled: bool,
    pub assist_api_keys: Vec<String>,
    pub hmac_secret: Option<String>,
    pub hmac_max_skew_ms: u64,
    pub rate_limit_rpm: HashMap<String, u32>,
    pub source_attribution: HashMap<String, ConfigSource>,
}

const DEFAULT_HMAC_MAX_SKEW_MS: u64 = 5 * 60 * 1000; // ±5 minutes, 

impl Config {
    /// Resolve configuration from the real process environment.
    #[must_use]
    pub fn from_process_env() -> Self {
        Self::from_env(&ProcessEnv, &[])
    }

    /// Resolve configuration from an arbitrary [`EnvReader`].
    ///
    /// `known_features` seeds `rate_limit_rpm` lookups for
    /// `CEE_<FEATURE>_RATE_LIMIT_RPM` — the feature names are not otherwise
    /// discoverable from the environment, since env vars don't enumerate
    /// themselves through this abstraction.
    #[must_use]
    pub fn from_env(env: &dyn EnvReader, known_features: &[&str]) -> Self {
        let mut source_attribution = HashMap::new();

        let prompts_enabled = bool_flag(env, "PROMPTS_ENABLED", true, &mut source_attribution);
        let legacy_pipeline_enabled = bool_flag(
            env,
            "CEE_LEGACY_PIPELINE_ENABLED",
            false,
            &mut source_attribution,
        );
        let evidence_pack_enabled =
            bool_flag(env, "ENABLE_EVIDENCE_PACK", false, &mut source_attribution);
        let sse_resume_live_enabled =
            bool_flag(env, "SSE_RESUME_LIVE_ENABLED", true, &mut source_attribution);

        let llm_failover_providers = match env.get("LLM_FAILOVER_PROVIDERS") {
            Some(raw) if !raw.trim().is_empty() => {
                source_attribution.insert("llm_failover_providers".to_string(), ConfigSource::Env);
                split_csv(&raw)
            }
            _ => {
                source_attribution
                    .insert("llm_failover_providers".to_string(), ConfigSource::Default);
                Vec::new()
            }
        };

        let assist_api_keys = match env.get("ASSIST_API_KEYS") {
            Some(raw) if !raw.trim().is_empty() => {
                source_attribution.insert("assist_api_keys".to_string(), ConfigSource::Env);
                split_csv(&raw)
            }
            _ => {
                source_attribution.insert("assist_api_keys".to_string(), ConfigSource::Default);
                Vec::new()
            }
        };

        let hmac_secret = env.get("HMAC_SECRET").filter(|s| !s.is_empty());
        source_attribution.insert(
            "hmac_secret".to_string(),
            if hmac_secret.is_some() {
                ConfigSource::Env
            } else {
                ConfigSource::Default
            },
        );

        let hmac_max_skew_ms = match env.get("HMAC_MAX_SKEW_MS").and_then(|v| v.parse().ok()) {
            Some(ms) => {
                source_attribution.insert("hmac_max_skew_ms".to_string(), ConfigSource::Env);
                ms
            }
            None => {
                source_attribution.insert("hmac_max_skew_ms".to_string(), ConfigSource::Default);
                DEFAULT_HMAC_MAX_SKEW_MS
            }
        };

        let mut rate_limit_rpm = HashMap::new();
        for feature in known_features {
            let key = format!(
                "CEE_{}_RATE_LIMIT_RPM",
                feature.to_uppercase().replace('-', "_")
            );
            if let Some(rpm) = env.get(&key).and_then(|v| v.parse().ok()) {
                source_attribution.insert(format!("rate_limit_rpm.{feature}"), ConfigSource::Env);
                rate_limit_rpm.insert((*feature).to_string(), rpm);
            }
        }

        Self {
            prompts_enabled,
            legacy_pipeline_enabled,
            evidence_pack_enabled,
            llm_failover_providers,
            sse_resume_live_enabled,
            assist_api_keys,
            hmac_secret,
            hmac_max_skew_ms,
            rate_limit_rpm,
            source_attribution,
        }
    }

    #[must_use]
    pub fn hmac_max_skew(&self) -> Duration {
        Duration::from_millis(self.hmac_max_skew_ms)
    }

    /// RPM budget for `feature`, or `default_rpm` when unconfigured.
    #[must_use]
    pub fn rate_limit_rpm_for(&self, feature: &str, default_rpm: u32) -> u32 {
        self.rate_limit_rpm.get(feature).copied().unwrap_or(default_rpm)
    }
}

fn bool_flag(
    env: &dyn EnvReader,
    key: &str,
    default: bool,
    source_attribution: &mut HashMap<String, ConfigSource>,
) -> bool {
    match env.get(key) {
        Some(raw) => {
            source_attribution.insert(key.to_lowercase(), ConfigSource::Env);
            matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
        }
        None => {
            source_attribution.insert(key.to_lowercase(), ConfigSource::Default);
            default
        }
    }
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> MapEnv {
        MapEnv(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::from_env(&env(&[]), &[]);
        assert!(cfg.prompts_enabled);
        assert!(!cfg.legacy_pipeline_enabled);
        assert!(!cfg.evidence_pack_enabled);
        assert!(cfg.llm_failover_providers.is_empty());
        assert_eq!(cfg.hmac_max_skew_ms, DEFAULT_HMAC_MAX_SKEW_MS);
        assert_eq!(
            cfg.source_attribution.get("cee_legacy_pipeline_enabled"),
            Some(&ConfigSource::Default)
        );
    }

    #[test]
    fn parses_ordered_csv_lists() {
        let cfg = Config::from_env(
            &env(&[
                ("LLM_FAILOVER_PROVIDERS", "anthropic, openai , gemini"),
                ("ASSIST_API_KEYS", "key-a,key-b"),
            ]),
            &[],
        );
        assert_eq!(
            cfg.llm_failover_providers,
            vec!["anthropic", "openai", "gemini"]
        );
        assert_eq!(cfg.assist_api_keys, vec!["key-a", "key-b"]);
    }

    #[test]
    fn per_feature_rate_limit_rpm_uses_feature_specific_key() {
        let cfg = Config::from_env(
            &env(&[("CEE_DRAFT_GRAPH_RATE_LIMIT_RPM", "3")]),
            &["draft-graph", "options"],
        );
        assert_eq!(cfg.rate_limit_rpm_for("draft-graph", 60), 3);
        assert_eq!(cfg.rate_limit_rpm_for("options", 60), 60);
    }

    #[test]
    fn legacy_pipeline_flag_accepts_common_truthy_spellings() {
        for value in ["1", "true", "TRUE", "yes", "on"] {
            let cfg = Config::from_env(&env(&[("CEE_LEGACY_PIPELINE_ENABLED", value)]), &[]);
            assert!(cfg.legacy_pipeline_enabled, "expected {value} to be truthy");
        }
    }
}
