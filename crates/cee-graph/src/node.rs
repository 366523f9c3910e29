//! Node kinds and kind-dependent data.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Canonical node kind. C4 maps non-canonical kinds (e.g. `"evidence"`) onto
/// one of these before a node ever reaches the rest of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Goal,
    Decision,
    Option,
    Factor,
    Outcome,
    Risk,
}

impl NodeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Goal => "goal",
            Self::Decision => "decision",
            Self::Option => "option",
            Self::Factor => "factor",
            Self::Outcome => "outcome",
            Self::Risk => "risk",
        }
    }

    /// All canonical kinds, for lookup tables that need to check "is this
    /// string already canonical" before consulting a non-canonical-kind
    /// mapping table.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [Self::Goal, Self::Decision, Self::Option, Self::Factor, Self::Outcome, Self::Risk]
    }
}

/// Declared or inferred category for a factor node. Controllable factors are
/// the ones an option's `interventions` may target; the repair sweep (C6)
/// reclassifies unreachable controllable factors to `Observable`/`External`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorCategory {
    Controllable,
    Observable,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorType {
    Cost,
    Price,
    Time,
    Probability,
    Revenue,
    Demand,
    Quality,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionType {
    Explicit,
    Inferred,
}

/// Kind-dependent payload. Rather than a tagged union (which would force an
/// artificial choice of "the" variant for a node whose kind is ambiguous
/// mid-pipeline, e.g. during category reconciliation), this is a flat bag of
/// optional fields — a node only ever populates the subset relevant to its
/// `kind`, and accessor methods on [`super::Node`] enforce that contract at
/// the read site instead of at the type level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeData {
    // Factor fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor_type: Option<FactorType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uncertainty_drivers: Vec<String>,
    #[serde(rename = "extractionType", skip_serializing_if = "Option::is_none")]
    pub extraction_type: Option<ExtractionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FactorCategory>,
    /// The category as originally declared on input, kept for the structural
    /// reconciliation stage to diff against the topology-inferred category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_category: Option<FactorCategory>,

    // Option fields
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub interventions: HashMap<String, f64>,

    // Goal fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_threshold_raw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_threshold_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_threshold_cap: Option<f64>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NodeData {
    /// Strip the controllable-only fields, returning the names stripped (for
    /// field-deletion audit entries). Used by the repair sweep's
    /// unreachable-factor and category-override stages.
    pub fn strip_controllable_only_fields(&mut self) -> Vec<&'static str> {
        let mut stripped = Vec::new();
        if self.value.take().is_some() {
            stripped.push("data.value");
        }
        if self.factor_type.take().is_some() {
            stripped.push("data.factor_type");
        }
        if !self.uncertainty_drivers.is_empty() {
            self.uncertainty_drivers.clear();
            stripped.push("data.uncertainty_drivers");
        }
        stripped
    }
}

/// A node in the decision graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeData>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Node {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            label: None,
            description: None,
            data: None,
            extra: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn is_factor(&self) -> bool {
        self.kind == NodeKind::Factor
    }

    #[must_use]
    pub fn factor_category(&self) -> Option<FactorCategory> {
        self.data.as_ref().and_then(|d| d.category)
    }

    #[must_use]
    pub fn factor_value(&self) -> Option<f64> {
        self.data.as_ref().and_then(|d| d.value)
    }

    #[must_use]
    pub fn interventions(&self) -> Option<&HashMap<String, f64>> {
        self.data.as_ref().map(|d| &d.interventions)
    }

    pub fn data_mut(&mut self) -> &mut NodeData {
        self.data.get_or_insert_with(NodeData::default)
    }
}
