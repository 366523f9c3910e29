use serde::{Deserialize, Serialize};

pub const BIAS_FINDINGS_MAX: usize = 10;
pub const OPTIONS_MAX: usize = 6;
pub const EVIDENCE_SUGGESTIONS_MAX: usize = 20;
pub const SENSITIVITY_SUGGESTIONS_MAX: usize = 10;

/// Which response lists got truncated to fit their caps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseLimits {
    #[serde(default)]
    pub bias_findings_truncated: bool,
    #[serde(default)]
    pub options_truncated: bool,
    #[serde(default)]
    pub evidence_suggestions_truncated: bool,
    #[serde(default)]
    pub sensitivity_suggestions_truncated: bool,
}

/// Truncate `items` to `max` entries, returning whether truncation
/// happened.
pub fn truncate_list<T>(items: &mut Vec<T>, max: usize) -> bool {
    if items.len() > max {
        items.truncate(max);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_and_reports_when_over_the_cap() {
        let mut items: Vec<i32> = (0..15).collect();
        let truncated = truncate_list(&mut items, BIAS_FINDINGS_MAX);
        assert!(truncated);
        assert_eq!(items.len(), BIAS_FINDINGS_MAX);
    }

    #[test]
    fn leaves_under_cap_lists_untouched() {
        let mut items = vec![1, 2, 3];
        let truncated = truncate_list(&mut items, OPTIONS_MAX);
        assert!(!truncated);
        assert_eq!(items.len(), 3);
    }
}
