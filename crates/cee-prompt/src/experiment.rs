use serde::{Deserialize, Serialize};

use cee_utils::hash::sha256_first_u16;

/// An A/B experiment registered against a task id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experiment {
    pub name: String,
    pub task_id: String,
    pub treatment_percent: u8,
    pub treatment_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced_variant: Option<String>,
}

/// Which version a caller should receive for this experiment, and whether
/// that came from bucketing or a forced override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    Treatment { version: String, forced: bool },
    Control,
}

impl Experiment {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        task_id: impl Into<String>,
        treatment_percent: u8,
        treatment_version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            task_id: task_id.into(),
            treatment_percent: treatment_percent.min(100),
            treatment_version: treatment_version.into(),
            forced_variant: None,
        }
    }

    #[must_use]
    pub fn with_forced_variant(mut self, version: impl Into<String>) -> Self {
        self.forced_variant = Some(version.into());
        self
    }

    /// Deterministic bucketing: hash
    /// `"{experimentName}:{bucketing_key}"` with SHA-256, take the first 16
    /// bits, compute modulo 100; treatment iff strictly less than
    /// `treatment_percent`. A forced variant always wins.
    #[must_use]
    pub fn assign(&self, bucketing_key: &str) -> Assignment {
        if let Some(forced) = &self.forced_variant {
            return Assignment::Treatment {
                version: forced.clone(),
                forced: true,
            };
        }

        let input = format!("{}:{}", self.name, bucketing_key);
        let bucket = u32::from(sha256_first_u16(&input)) % 100;
        if bucket < u32::from(self.treatment_percent) {
            Assignment::Treatment {
                version: self.treatment_version.clone(),
                forced: false,
            }
        } else {
            Assignment::Control
        }
    }
}
