use cee_graph::{NodeKind, PipelineContext};

use crate::patterns::{self, METRIC_GUARD_WORDS};

/// Goal-threshold redirection. Only the first goal node
/// is ever annotated, and only the first matching target phrase in the
/// brief is used — later matches are ignored once a threshold is set.
///
/// Returns the byte span of the brief consumed into the goal threshold (the
/// numeric value plus its trailing `%`/unit word, if any), so the caller can
/// keep quantity extraction from re-injecting the same span as a factor.
pub fn redirect_goal_threshold(ctx: &mut PipelineContext, brief: &str) -> Option<(usize, usize)> {
    let goal_id = ctx.graph.nodes_of_kind(NodeKind::Goal).next().map(|n| n.id.clone())?;
    let extracted = find_target(brief)?;

    let goal = ctx.graph.node_mut(&goal_id)?;
    let data = goal.data_mut();
    data.goal_threshold_raw = Some(extracted.raw);
    if let Some(unit) = extracted.unit {
        data.goal_threshold_unit = Some(unit);
    }
    if extracted.is_percentage {
        data.goal_threshold = Some(extracted.raw / 100.0);
    } else {
        let cap = next_power_of_ten(extracted.raw);
        data.goal_threshold_cap = Some(cap);
        data.goal_threshold = Some(extracted.raw / cap);
    }
    Some(extracted.span)
}

struct ExtractedTarget {
    raw: f64,
    unit: Option<String>,
    is_percentage: bool,
    /// Byte range in the brief consumed by this target match.
    span: (usize, usize),
}

fn find_target(brief: &str) -> Option<ExtractedTarget> {
    let re = patterns::target_regex();
    for caps in re.captures_iter(brief) {
        let between = caps.get(1).map_or("", |m| m.as_str()).to_lowercase();
        if METRIC_GUARD_WORDS.iter().any(|w| between.contains(w)) {
            continue;
        }
        let value_match = caps.get(2)?;
        let raw_match = value_match.as_str();
        let digits: String = raw_match.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
        let raw = patterns::parse_number(&digits)?;

        let span_start = value_match.start();
        let tail_start = value_match.end();
        let tail = &brief[tail_start..brief.len().min(tail_start + 6)];
        if tail.trim_start().starts_with('%') {
            let pct_offset = tail.find('%').expect("checked above");
            let span_end = tail_start + pct_offset + 1;
            return Some(ExtractedTarget { raw, unit: None, is_percentage: true, span: (span_start, span_end) });
        }

        let is_currency = raw_match.starts_with(['£', '$', '€']);
        if is_currency {
            return Some(ExtractedTarget {
                raw,
                unit: Some("currency".to_string()),
                is_percentage: false,
                span: (span_start, tail_start),
            });
        }

        let (unit, consumed) = match extract_count_unit(&brief[tail_start..]) {
            Some((word, consumed)) => (Some(word), consumed),
            None => (None, 0),
        };
        return Some(ExtractedTarget { raw, unit, is_percentage: false, span: (span_start, tail_start + consumed) });
    }
    None
}

/// Leading-whitespace-trimmed alphabetic unit word right after a target
/// value, paired with how many bytes of `tail` (whitespace + word) it
/// consumed.
fn extract_count_unit(tail: &str) -> Option<(String, usize)> {
    let leading_ws = tail.len() - tail.trim_start().len();
    let trimmed = &tail[leading_ws..];
    let word: String = trimmed.chars().take_while(|c| c.is_alphabetic()).collect();
    if word.is_empty() {
        None
    } else {
        Some((word.to_lowercase(), leading_ws + word.len()))
    }
}

/// The smallest power of ten `>= value`, used for `goal_threshold_cap`.
/// `value <= 0` caps at `1.0`.
pub fn next_power_of_ten(value: f64) -> f64 {
    if value <= 0.0 {
        return 1.0;
    }
    let mut cap = 1.0_f64;
    while cap < value {
        cap *= 10.0;
    }
    cap
}

#[cfg(test)]
mod tests {
    use super::*;
    use cee_graph::{Graph, Node};
    use cee_utils::ids::{CorrelationId, RequestId};

    fn ctx_with_goal() -> PipelineContext {
        let mut graph = Graph::new("v1", 1);
        graph.nodes.push(Node::new("g1", NodeKind::Goal));
        PipelineContext::new(RequestId::generate(), CorrelationId::generate(), graph)
    }

    #[test]
    fn extracts_count_target() {
        let mut ctx = ctx_with_goal();
        let brief = "Target 800 customers in the next quarter.";
        let span = redirect_goal_threshold(&mut ctx, brief).unwrap();
        let goal = ctx.graph.node("g1").unwrap();
        let data = goal.data.as_ref().unwrap();
        assert_eq!(data.goal_threshold_raw, Some(800.0));
        assert_eq!(data.goal_threshold_cap, Some(1000.0));
        assert!((data.goal_threshold.unwrap() - 0.8).abs() < 1e-9);
        assert_eq!(&brief[span.0..span.1], "800 customers");
    }

    #[test]
    fn extracts_percentage_target_as_a_fraction() {
        let mut ctx = ctx_with_goal();
        let brief = "Target 15% conversion rate.";
        let span = redirect_goal_threshold(&mut ctx, brief).unwrap();
        let goal = ctx.graph.node("g1").unwrap();
        let data = goal.data.as_ref().unwrap();
        assert_eq!(data.goal_threshold_raw, Some(15.0));
        assert!((data.goal_threshold.unwrap() - 0.15).abs() < 1e-9);
        assert!(data.goal_threshold_cap.is_none());
        assert_eq!(&brief[span.0..span.1], "15%");
    }

    #[test]
    fn metric_like_phrase_does_not_trigger() {
        let mut ctx = ctx_with_goal();
        assert!(redirect_goal_threshold(&mut ctx, "Our target market churn is 8%.").is_none());
        let goal = ctx.graph.node("g1").unwrap();
        assert!(goal.data.is_none() || goal.data.as_ref().unwrap().goal_threshold.is_none());
    }

    #[test]
    fn next_power_of_ten_rounds_up() {
        assert!((next_power_of_ten(800.0) - 1000.0).abs() < f64::EPSILON);
        assert!((next_power_of_ten(1000.0) - 1000.0).abs() < f64::EPSILON);
        assert!((next_power_of_ten(0.0) - 1.0).abs() < f64::EPSILON);
    }
}
