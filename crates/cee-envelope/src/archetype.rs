use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    Pricing,
    BuildVsBuy,
    Hiring,
    MarketEntry,
    ResourceAllocation,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Fuzzy,
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Archetype {
    pub decision_type: DecisionType,
    #[serde(rename = "match")]
    pub match_kind: MatchKind,
    pub confidence: Confidence,
}

/// Fixed classification priority — the first category with any keyword hit
/// wins ("pricing > build_vs_buy > hiring > market_entry >
/// resource_allocation").
const CATEGORIES: &[(DecisionType, &[&str])] = &[
    (DecisionType::Pricing, &["pricing", "price point", "discount", "subscription tier", "price increase"]),
    (DecisionType::BuildVsBuy, &["build vs buy", "build versus buy", "in-house", "outsource", "buy vs build"]),
    (DecisionType::Hiring, &["hire", "hiring", "headcount", "recruit", "new hire"]),
    (DecisionType::MarketEntry, &["market entry", "new market", "expansion", "launch in", "enter the market"]),
    (
        DecisionType::ResourceAllocation,
        &["resource allocation", "budget allocation", "reallocate", "prioritize resources"],
    ),
];

/// Classify a brief + optional caller-supplied hint into an [`Archetype`]
///. When detection is disabled, the hint is accepted verbatim
/// with `match: fuzzy` and a neutral confidence.
#[must_use]
pub fn classify(brief: &str, hint: Option<&str>, detection_enabled: bool) -> Archetype {
    if !detection_enabled {
        let decision_type = hint.and_then(parse_hint).unwrap_or(DecisionType::Other);
        return Archetype {
            decision_type,
            match_kind: MatchKind::Fuzzy,
            confidence: Confidence::Medium,
        };
    }

    let haystack = format!("{brief} {}", hint.unwrap_or_default()).to_lowercase();

    let classified = CATEGORIES.iter().find_map(|(kind, keywords)| {
        let hits = keywords.iter().filter(|kw| haystack.contains(*kw)).count();
        (hits > 0).then_some((*kind, hits))
    });

    let (decision_type, hits) = classified.unwrap_or((DecisionType::Other, 0));
    let confidence = match hits {
        0 => Confidence::Low,
        1 => Confidence::Medium,
        _ => Confidence::High,
    };

    let match_kind = match hint.and_then(parse_hint) {
        None => MatchKind::Generic,
        Some(hinted) if hinted == decision_type => MatchKind::Exact,
        Some(_) => MatchKind::Fuzzy,
    };

    Archetype { decision_type, match_kind, confidence }
}

fn parse_hint(hint: &str) -> Option<DecisionType> {
    match hint.to_lowercase().replace([' ', '-'], "_").as_str() {
        "pricing" => Some(DecisionType::Pricing),
        "build_vs_buy" => Some(DecisionType::BuildVsBuy),
        "hiring" => Some(DecisionType::Hiring),
        "market_entry" => Some(DecisionType::MarketEntry),
        "resource_allocation" => Some(DecisionType::ResourceAllocation),
        "other" => Some(DecisionType::Other),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_keywords_win_over_hiring_when_both_present() {
        let archetype = classify("We're debating a price increase and a new hire.", None, true);
        assert_eq!(archetype.decision_type, DecisionType::Pricing);
    }

    #[test]
    fn two_keyword_hits_yield_high_confidence() {
        let archetype = classify("A subscription tier price increase is on the table.", None, true);
        assert_eq!(archetype.confidence, Confidence::High);
    }

    #[test]
    fn no_keyword_hits_yield_low_confidence_and_other() {
        let archetype = classify("We need to pick a new logo.", None, true);
        assert_eq!(archetype.decision_type, DecisionType::Other);
        assert_eq!(archetype.confidence, Confidence::Low);
    }

    #[test]
    fn disabled_detection_accepts_hint_verbatim_as_fuzzy() {
        let archetype = classify("irrelevant text", Some("hiring"), false);
        assert_eq!(archetype.decision_type, DecisionType::Hiring);
        assert_eq!(archetype.match_kind, MatchKind::Fuzzy);
    }

    #[test]
    fn matching_hint_yields_exact_match() {
        let archetype = classify("Considering a price increase.", Some("pricing"), true);
        assert_eq!(archetype.match_kind, MatchKind::Exact);
    }

    #[test]
    fn no_hint_yields_generic_match() {
        let archetype = classify("Considering a price increase.", None, true);
        assert_eq!(archetype.match_kind, MatchKind::Generic);
    }
}
