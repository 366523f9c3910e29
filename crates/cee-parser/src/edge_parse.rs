use serde_json::Value;

use cee_graph::{EffectDirection, Edge, MIN_STRENGTH_STD};

use crate::error::ParseError;

/// Accept either accepted wire shape for an edge — nested
/// `{strength: {mean, std}, exists_probability}` or flat
/// `{strength_mean, strength_std, belief_exists}` — and unify both into the
/// single canonical [`Edge`]. A node
/// mixing both shapes prefers the nested form, matching how the upstream
/// LLM adapters have been observed to emit it.
pub fn parse_edge(raw: Value) -> Result<Edge, ParseError> {
    let obj = raw.as_object().ok_or_else(|| ParseError::InvalidSchema {
        reason: "edge is not a JSON object".to_string(),
    })?;

    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::InvalidSchema {
            reason: "edge is missing required field 'id'".to_string(),
        })?
        .to_string();
    let from = obj
        .get("from")
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::InvalidSchema {
            reason: format!("edge '{id}' is missing required field 'from'"),
        })?
        .to_string();
    let to = obj
        .get("to")
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::InvalidSchema {
            reason: format!("edge '{id}' is missing required field 'to'"),
        })?
        .to_string();

    let (strength_mean, strength_std) = if let Some(nested) = obj.get("strength").and_then(Value::as_object) {
        let mean = nested
            .get("mean")
            .and_then(Value::as_f64)
            .ok_or_else(|| ParseError::InvalidSchema {
                reason: format!("edge '{id}' has a 'strength' object without numeric 'mean'"),
            })?;
        let std = nested.get("std").and_then(Value::as_f64).unwrap_or(MIN_STRENGTH_STD);
        (mean, std)
    } else {
        let mean = obj
            .get("strength_mean")
            .and_then(Value::as_f64)
            .ok_or_else(|| ParseError::InvalidSchema {
                reason: format!("edge '{id}' has neither a nested 'strength' object nor 'strength_mean'"),
            })?;
        let std = obj
            .get("strength_std")
            .and_then(Value::as_f64)
            .unwrap_or(MIN_STRENGTH_STD);
        (mean, std)
    };

    let exists_probability = obj
        .get("exists_probability")
        .and_then(Value::as_f64)
        .or_else(|| obj.get("belief_exists").and_then(Value::as_f64))
        .ok_or_else(|| ParseError::InvalidSchema {
            reason: format!("edge '{id}' is missing both 'exists_probability' and 'belief_exists'"),
        })?;

    let effect_direction = obj
        .get("effect_direction")
        .and_then(Value::as_str)
        .map_or(EffectDirection::Positive, |s| {
            if s.eq_ignore_ascii_case("negative") {
                EffectDirection::Negative
            } else {
                EffectDirection::Positive
            }
        });

    let mut edge = Edge::new(id, from, to, strength_mean, strength_std, exists_probability, effect_direction);

    for (k, v) in obj {
        if !matches!(
            k.as_str(),
            "id" | "from"
                | "to"
                | "strength"
                | "strength_mean"
                | "strength_std"
                | "exists_probability"
                | "belief_exists"
                | "effect_direction"
        ) {
            edge.extra.insert(k.clone(), v.clone());
        }
    }

    Ok(edge)
}
