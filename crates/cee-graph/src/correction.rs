//! Audit trail types: `Correction` and `FieldDeletion`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Cee,
    Plot,
    Isl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// An append-only record of a mutation performed by a pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correction {
    pub code: String,
    pub layer: Layer,
    pub field_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
    pub reason: String,
    pub severity: Severity,
}

impl Correction {
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        layer: Layer,
        field_path: impl Into<String>,
        reason: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            code: code.into(),
            layer,
            field_path: field_path.into(),
            before: None,
            after: None,
            reason: reason.into(),
            severity,
        }
    }

    #[must_use]
    pub fn with_before_after(
        mut self,
        before: Option<serde_json::Value>,
        after: Option<serde_json::Value>,
    ) -> Self {
        self.before = before;
        self.after = after;
        self
    }
}

/// A per-field deletion audit entry, recorded alongside the `Correction`
/// that caused it ("every stripping is recorded both as a
/// correction ... and as a field-deletion audit entry").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDeletion {
    pub stage: String,
    pub node_id: String,
    pub field: String,
    pub reason: String,
}

impl FieldDeletion {
    #[must_use]
    pub fn new(
        stage: impl Into<String>,
        node_id: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            stage: stage.into(),
            node_id: node_id.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}
