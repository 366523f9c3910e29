use cee_graph::NodeKind;

/// Fixed non-canonical-kind → canonical-kind mapping table. A kind not
/// already canonical and absent from this table maps to `Factor`, the
/// closest generic kind.
const NON_CANONICAL_TABLE: &[(&str, NodeKind)] = &[
    ("evidence", NodeKind::Factor),
    ("assumption", NodeKind::Factor),
    ("variable", NodeKind::Factor),
    ("metric", NodeKind::Factor),
    ("choice", NodeKind::Option),
    ("alternative", NodeKind::Option),
    ("path", NodeKind::Option),
    ("objective", NodeKind::Goal),
    ("target", NodeKind::Goal),
    ("aim", NodeKind::Goal),
    ("decision_point", NodeKind::Decision),
    ("choice_point", NodeKind::Decision),
    ("result", NodeKind::Outcome),
    ("consequence", NodeKind::Outcome),
    ("effect", NodeKind::Outcome),
    ("threat", NodeKind::Risk),
    ("hazard", NodeKind::Risk),
    ("uncertainty", NodeKind::Risk),
];

/// Map a raw `kind` string onto a canonical [`NodeKind`]. Already-canonical
/// strings round-trip unchanged.
#[must_use]
pub fn canonicalize(raw_kind: &str) -> NodeKind {
    for kind in NodeKind::all() {
        if kind.as_str() == raw_kind {
            return kind;
        }
    }
    NON_CANONICAL_TABLE
        .iter()
        .find(|(name, _)| *name == raw_kind)
        .map_or(NodeKind::Factor, |(_, kind)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_kinds_round_trip() {
        for kind in NodeKind::all() {
            assert_eq!(canonicalize(kind.as_str()), kind);
        }
    }

    #[test]
    fn known_non_canonical_kinds_map_correctly() {
        assert_eq!(canonicalize("evidence"), NodeKind::Factor);
        assert_eq!(canonicalize("choice"), NodeKind::Option);
        assert_eq!(canonicalize("objective"), NodeKind::Goal);
        assert_eq!(canonicalize("threat"), NodeKind::Risk);
    }

    #[test]
    fn unknown_kind_falls_back_to_factor() {
        assert_eq!(canonicalize("totally_unrecognised_kind"), NodeKind::Factor);
    }
}
