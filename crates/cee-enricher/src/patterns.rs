/// Metric-sounding words that disqualify an otherwise-matching "target ..."
/// phrase from goal-threshold redirection ("Metric-like
/// phrases ('target market churn is 8%') must not trigger redirection").
pub const METRIC_GUARD_WORDS: &[&str] = &[
    "churn", "attrition", "margin", "conversion rate", "bounce rate", "error rate",
];

/// A quantity kind recognised by the brief scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Currency,
    Count,
    Time,
    Percentage,
}

impl QuantityKind {
    #[must_use]
    pub fn is_percentage(self) -> bool {
        matches!(self, Self::Percentage)
    }
}

/// Compiled once per call site rather than cached in a `static`.
pub fn currency_regex() -> regex::Regex {
    regex::Regex::new(r"(?i)[£$€]\s?(\d[\d,]*(?:\.\d+)?)\s*(k|m)?\s*(mrr|arr|revenue|sales)?").unwrap()
}

pub fn count_regex() -> regex::Regex {
    regex::Regex::new(
        r"(?i)\b(\d[\d,]*(?:\.\d+)?)\s*(customers|users|signups|subscribers|clients|leads|employees|units)\b",
    )
    .unwrap()
}

pub fn time_regex() -> regex::Regex {
    regex::Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(days?|weeks?|months?|years?|hours?)\b").unwrap()
}

pub fn percentage_regex() -> regex::Regex {
    regex::Regex::new(r"(\d+(?:\.\d+)?)\s*%").unwrap()
}

/// "Target 800 customers" / "target ... 8%" redirection trigger: captures
/// everything between `target`/`targeting` and the first digit so the
/// caller can check it against [`METRIC_GUARD_WORDS`].
pub fn target_regex() -> regex::Regex {
    regex::Regex::new(r"(?i)\btarget(?:ing)?\s+(?:is\s+)?([a-z\s]{0,24}?)([£$€]?\d[\d,]*(?:\.\d+)?)").unwrap()
}

/// Parse a `\d[\d,]*(?:\.\d+)?` capture (commas stripped) to an `f64`.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse::<f64>().ok()
}

/// `k`/`m` magnitude suffix multiplier, case-insensitive.
pub fn suffix_multiplier(suffix: Option<&str>) -> f64 {
    match suffix.map(str::to_lowercase).as_deref() {
        Some("k") => 1_000.0,
        Some("m") => 1_000_000.0,
        _ => 1.0,
    }
}
