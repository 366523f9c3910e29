use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PromptError;
use crate::status::PromptStatus;
use crate::version::PromptVersion;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRecord {
    pub approved_by: String,
    pub approved_at: DateTime<Utc>,
}

/// A task's full prompt history: status, append-only versions, the active
/// production version, an optional staging version, and an optional
/// approval record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub task_id: String,
    pub status: PromptStatus,
    pub versions: Vec<PromptVersion>,
    pub active_version: Option<String>,
    pub staging_version: Option<String>,
    pub approval: Option<ApprovalRecord>,
}

impl Prompt {
    #[must_use]
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            status: PromptStatus::Draft,
            versions: Vec::new(),
            active_version: None,
            staging_version: None,
            approval: None,
        }
    }

    /// Append a new immutable version ("versions are immutable
    /// once written").
    pub fn add_version(&mut self, version: PromptVersion) -> Result<(), PromptError> {
        if self.versions.iter().any(|v| v.version == version.version) {
            return Err(PromptError::VersionAlreadyExists { version: version.version });
        }
        self.versions.push(version);
        Ok(())
    }

    #[must_use]
    pub fn version(&self, version: &str) -> Option<&PromptVersion> {
        self.versions.iter().find(|v| v.version == version)
    }

    #[must_use]
    pub fn active(&self) -> Option<&PromptVersion> {
        self.active_version.as_deref().and_then(|v| self.version(v))
    }

    #[must_use]
    pub fn staging(&self) -> Option<&PromptVersion> {
        self.staging_version.as_deref().and_then(|v| self.version(v))
    }

    pub fn set_staging(&mut self, version: &str) -> Result<(), PromptError> {
        if self.version(version).is_none() {
            return Err(PromptError::VersionNotFound {
                version: version.to_string(),
            });
        }
        self.staging_version = Some(version.to_string());
        self.status = PromptStatus::Staging;
        Ok(())
    }

    /// Promote `version` to production. Fails naming the incumbent if a
    /// different version is already production ("promoting a
    /// version to production while another exists fails with a
    /// config-level error naming the incumbent"); promoting the already-
    /// active version is a no-op success.
    pub fn promote_to_production(&mut self, version: &str) -> Result<(), PromptError> {
        if self.version(version).is_none() {
            return Err(PromptError::VersionNotFound {
                version: version.to_string(),
            });
        }
        if let Some(incumbent) = &self.active_version {
            if incumbent != version && self.status == PromptStatus::Production {
                return Err(PromptError::IncumbentProductionExists {
                    incumbent: incumbent.clone(),
                    candidate: version.to_string(),
                });
            }
        }
        self.active_version = Some(version.to_string());
        self.status = PromptStatus::Production;
        Ok(())
    }

    pub fn archive(&mut self) {
        self.status = PromptStatus::Archived;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(id: &str) -> PromptVersion {
        PromptVersion::new(id, format!("content for {id}"), Utc::now())
    }

    #[test]
    fn promoting_first_version_succeeds() {
        let mut prompt = Prompt::new("draft_graph");
        prompt.add_version(version("v1")).unwrap();
        prompt.promote_to_production("v1").unwrap();
        assert_eq!(prompt.status, PromptStatus::Production);
        assert_eq!(prompt.active_version.as_deref(), Some("v1"));
    }

    #[test]
    fn promoting_over_an_incumbent_fails_naming_it() {
        let mut prompt = Prompt::new("draft_graph");
        prompt.add_version(version("v1")).unwrap();
        prompt.add_version(version("v2")).unwrap();
        prompt.promote_to_production("v1").unwrap();

        let err = prompt.promote_to_production("v2").unwrap_err();
        assert_eq!(
            err,
            PromptError::IncumbentProductionExists {
                incumbent: "v1".to_string(),
                candidate: "v2".to_string(),
            }
        );
    }

    #[test]
    fn re_promoting_the_active_version_is_a_no_op_success() {
        let mut prompt = Prompt::new("draft_graph");
        prompt.add_version(version("v1")).unwrap();
        prompt.promote_to_production("v1").unwrap();
        prompt.promote_to_production("v1").unwrap();
    }

    #[test]
    fn versions_are_immutable_once_written() {
        let mut prompt = Prompt::new("draft_graph");
        prompt.add_version(version("v1")).unwrap();
        let err = prompt.add_version(version("v1")).unwrap_err();
        assert_eq!(err, PromptError::VersionAlreadyExists { version: "v1".to_string() });
    }
}
