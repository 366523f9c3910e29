//! Edges and the two accepted wire shapes, unified into one canonical form.

use serde::{Deserialize, Serialize};

/// The minimum `strength.std` the normaliser will accept; anything lower is
/// clamped up.
pub const MIN_STRENGTH_STD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectDirection {
    Positive,
    Negative,
}

/// A directed edge, held internally in a single canonical form. Emitting
/// *both* accepted wire shapes back out is [`Edge::to_dual_shape_json`]'s
/// job, used at the package/boundary stage so downstream readers can use
/// either the nested or flat form without branching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub from: String,
    pub to: String,
    pub strength_mean: f64,
    pub strength_std: f64,
    pub exists_probability: f64,
    pub effect_direction: EffectDirection,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Edge {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        strength_mean: f64,
        strength_std: f64,
        exists_probability: f64,
        effect_direction: EffectDirection,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            strength_mean,
            strength_std: strength_std.max(MIN_STRENGTH_STD),
            exists_probability,
            effect_direction,
            extra: serde_json::Map::new(),
        }
    }

    /// Clamp `strength_std` up to the floor ("for all
    /// graphs, after normalisation: ... every `strength_std >= 0.05`").
    pub fn clamp_strength_std(&mut self) {
        if self.strength_std < MIN_STRENGTH_STD {
            self.strength_std = MIN_STRENGTH_STD;
        }
    }

    /// The weight used to pick the weakest edge on a cycle:
    /// `strength_mean * exists_probability`.
    #[must_use]
    pub fn cycle_break_weight(&self) -> f64 {
        self.strength_mean * self.exists_probability
    }

    /// Emit a JSON object carrying both accepted wire shapes simultaneously:
    /// the nested `{strength: {mean, std}, exists_probability}` form and the
    /// flat `{strength_mean, strength_std, belief_exists}` form, plus any
    /// preserved unknown fields.
    #[must_use]
    pub fn to_dual_shape_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        for (k, v) in &self.extra {
            obj.insert(k.clone(), v.clone());
        }
        obj.insert("id".to_string(), serde_json::json!(self.id));
        obj.insert("from".to_string(), serde_json::json!(self.from));
        obj.insert("to".to_string(), serde_json::json!(self.to));
        obj.insert(
            "strength".to_string(),
            serde_json::json!({ "mean": self.strength_mean, "std": self.strength_std }),
        );
        obj.insert(
            "exists_probability".to_string(),
            serde_json::json!(self.exists_probability),
        );
        obj.insert(
            "strength_mean".to_string(),
            serde_json::json!(self.strength_mean),
        );
        obj.insert(
            "strength_std".to_string(),
            serde_json::json!(self.strength_std),
        );
        obj.insert(
            "belief_exists".to_string(),
            serde_json::json!(self.exists_probability),
        );
        obj.insert(
            "effect_direction".to_string(),
            serde_json::json!(self.effect_direction),
        );
        serde_json::Value::Object(obj)
    }

    /// Sort key for canonical ordering: `(from, to, id)` ascending. Ties
    /// are broken by insertion order, which a stable sort preserves
    /// automatically.
    #[must_use]
    pub fn sort_key(&self) -> (&str, &str, &str) {
        (&self.from, &self.to, &self.id)
    }
}
