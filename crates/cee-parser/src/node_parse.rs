use serde_json::Value;

use cee_graph::{Correction, Layer, Node, Severity};

use crate::error::ParseError;
use crate::kind_table;

/// Canonicalise a single raw node. Fields other than `kind` pass through
/// untouched — `Node`'s `#[serde(flatten)]` extra map and `NodeData`'s own
/// flatten both preserve anything this crate doesn't know about.
pub fn parse_node(raw: Value) -> Result<(Node, Option<Correction>), ParseError> {
    let mut obj = raw
        .as_object()
        .cloned()
        .ok_or_else(|| ParseError::InvalidSchema {
            reason: "node is not a JSON object".to_string(),
        })?;

    let raw_kind = obj
        .get("kind")
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::InvalidSchema {
            reason: "node is missing required field 'kind'".to_string(),
        })?
        .to_string();

    let node_id = obj
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
        .to_string();

    let canonical = kind_table::canonicalize(&raw_kind);
    let correction = (canonical.as_str() != raw_kind).then(|| {
        Correction::new(
            "NODE_KIND_CANONICALIZED",
            Layer::Cee,
            format!("nodes[{node_id}].kind"),
            format!("non-canonical kind '{raw_kind}' mapped to '{}'", canonical.as_str()),
            Severity::Info,
        )
        .with_before_after(
            Some(Value::String(raw_kind.clone())),
            Some(Value::String(canonical.as_str().to_string())),
        )
    });

    obj.insert("kind".to_string(), Value::String(canonical.as_str().to_string()));

    let mut node: Node = serde_json::from_value(Value::Object(obj)).map_err(|e| ParseError::InvalidSchema {
        reason: e.to_string(),
    })?;

    // The input's declared category is the baseline the repair stage's
    // structural reconciliation diffs against; capture it before anything
    // downstream has a chance to overwrite `data.category`.
    if let Some(data) = node.data.as_mut() {
        data.declared_category = data.category;
    }

    Ok((node, correction))
}
