use cee_graph::{Correction, ExtractionType, Layer, Node, NodeKind, PipelineContext, Severity};

use crate::metadata;
use crate::patterns::{self, QuantityKind};
use crate::threshold::next_power_of_ten;

struct Hit {
    kind: QuantityKind,
    raw: f64,
    unit: Option<String>,
    label: String,
    /// Byte range of the full match in the brief.
    span: (usize, usize),
}

/// Quantity extraction + normalisation + metadata population + dedup, run
/// after the early-exit check and goal-threshold redirection.
///
/// `redirected_span`, if set, is the byte range of the brief already
/// consumed into the goal threshold; any hit overlapping it is skipped so
/// the same quantity isn't also injected as a factor.
pub fn extract_quantities(ctx: &mut PipelineContext, brief: &str, redirected_span: Option<(usize, usize)>) {
    let mut next_auto_id = ctx.graph.nodes.len();
    for hit in scan(brief) {
        if redirected_span.is_some_and(|span| spans_overlap(hit.span, span)) {
            continue;
        }
        if let Some(existing_id) = find_overlapping_factor(ctx, &hit.label) {
            enhance_existing(ctx, &existing_id, &hit);
        } else {
            inject_factor(ctx, &hit, &mut next_auto_id);
        }
    }
}

fn spans_overlap(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

fn match_span(m: regex::Match) -> (usize, usize) {
    (m.start(), m.end())
}

fn scan(brief: &str) -> Vec<Hit> {
    let mut hits = Vec::new();

    for caps in patterns::currency_regex().captures_iter(brief) {
        let Some(raw) = caps.get(1).and_then(|m| patterns::parse_number(m.as_str())) else { continue };
        let multiplier = patterns::suffix_multiplier(caps.get(2).map(|m| m.as_str()));
        let unit = caps.get(3).map(|m| m.as_str().to_lowercase());
        hits.push(Hit {
            kind: QuantityKind::Currency,
            raw: raw * multiplier,
            label: unit.clone().unwrap_or_else(|| "cost".to_string()),
            unit,
            span: match_span(caps.get(0).unwrap()),
        });
    }

    for caps in patterns::count_regex().captures_iter(brief) {
        let Some(raw) = caps.get(1).and_then(|m| patterns::parse_number(m.as_str())) else { continue };
        let unit = caps.get(2).map(|m| m.as_str().to_lowercase());
        hits.push(Hit {
            kind: QuantityKind::Count,
            raw,
            label: unit.clone().unwrap_or_else(|| "count".to_string()),
            unit,
            span: match_span(caps.get(0).unwrap()),
        });
    }

    for caps in patterns::time_regex().captures_iter(brief) {
        let Some(raw) = caps.get(1).and_then(|m| patterns::parse_number(m.as_str())) else { continue };
        let unit = caps.get(2).map(|m| m.as_str().to_lowercase());
        hits.push(Hit {
            kind: QuantityKind::Time,
            raw,
            label: unit.clone().unwrap_or_else(|| "duration".to_string()),
            unit,
            span: match_span(caps.get(0).unwrap()),
        });
    }

    for caps in patterns::percentage_regex().captures_iter(brief) {
        let Some(raw) = caps.get(1).and_then(|m| patterns::parse_number(m.as_str())) else { continue };
        hits.push(Hit {
            kind: QuantityKind::Percentage,
            raw,
            unit: None,
            label: "percentage".to_string(),
            span: match_span(caps.get(0).unwrap()),
        });
    }

    hits
}

/// Label-overlap dedup: an existing factor "covers" a hit
/// if its label shares a word with the hit's derived label.
fn find_overlapping_factor(ctx: &PipelineContext, hit_label: &str) -> Option<String> {
    let hit_words: Vec<&str> = hit_label.split_whitespace().collect();
    ctx.graph.nodes_of_kind(NodeKind::Factor).find_map(|n| {
        let label = n.label.as_deref()?.to_lowercase();
        hit_words
            .iter()
            .any(|w| label.contains(&w.to_lowercase()))
            .then(|| n.id.clone())
    })
}

fn enhance_existing(ctx: &mut PipelineContext, node_id: &str, hit: &Hit) {
    let factor_type = metadata::factor_type_for(hit.kind, hit.unit.as_deref());
    let drivers = metadata::uncertainty_drivers_for(factor_type);
    let Some(node) = ctx.graph.node_mut(node_id) else { return };
    let already_has_value = node.data.as_ref().is_some_and(|d| d.value.is_some());
    if already_has_value {
        return;
    }
    let data = node.data_mut();
    apply_normalisation(data, hit);
    data.factor_type = Some(factor_type);
    data.uncertainty_drivers = drivers;
    ctx.corrections.push(Correction::new(
        "FACTOR_ENHANCED_FROM_BRIEF",
        Layer::Cee,
        format!("nodes[{node_id}].data"),
        "populated factor value from a quantity extracted out of the brief",
        Severity::Info,
    ));
}

fn inject_factor(ctx: &mut PipelineContext, hit: &Hit, next_auto_id: &mut usize) {
    let id = format!("factor_auto_{next_auto_id}");
    *next_auto_id += 1;

    let mut node = Node::new(id.clone(), NodeKind::Factor);
    node.label = Some(format!("Extracted: {}", hit.label));
    let factor_type = metadata::factor_type_for(hit.kind, hit.unit.as_deref());
    let data = node.data_mut();
    data.extraction_type = Some(ExtractionType::Inferred);
    apply_normalisation(data, hit);
    data.factor_type = Some(factor_type);
    data.uncertainty_drivers = metadata::uncertainty_drivers_for(factor_type);

    ctx.graph.nodes.push(node);
    ctx.corrections.push(Correction::new(
        "FACTOR_INJECTED_FROM_BRIEF",
        Layer::Cee,
        format!("nodes[{id}]"),
        "injected a new factor from a quantity extracted out of the brief",
        Severity::Info,
    ));
}

fn apply_normalisation(data: &mut cee_graph::NodeData, hit: &Hit) {
    if hit.kind.is_percentage() {
        data.value = Some((hit.raw / 100.0).clamp(0.0, 1.0));
    } else {
        let cap = next_power_of_ten(hit.raw);
        data.raw_value = Some(hit.raw);
        data.cap = Some(cap);
        data.value = Some((hit.raw / cap).clamp(0.0, 1.0));
    }
    if let Some(unit) = &hit.unit {
        data.unit = Some(unit.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cee_graph::Graph;
    use cee_utils::ids::{CorrelationId, RequestId};

    fn empty_ctx() -> PipelineContext {
        let graph = Graph::new("v1", 1);
        PipelineContext::new(RequestId::generate(), CorrelationId::generate(), graph)
    }

    #[test]
    fn injects_a_factor_for_a_currency_quantity() {
        let mut ctx = empty_ctx();
        extract_quantities(&mut ctx, "Monthly costs are around £20k MRR right now.", None);
        assert!(ctx.graph.nodes_of_kind(NodeKind::Factor).count() >= 1);
        let node = ctx.graph.nodes_of_kind(NodeKind::Factor).next().unwrap();
        assert!((node.factor_value().unwrap() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn percentage_quantity_is_stored_as_a_fraction() {
        let mut ctx = empty_ctx();
        extract_quantities(&mut ctx, "Expected conversion is 8%.", None);
        let node = ctx.graph.nodes_of_kind(NodeKind::Factor).next().unwrap();
        assert!((node.factor_value().unwrap() - 0.08).abs() < 1e-9);
        assert!(node.data.as_ref().unwrap().cap.is_none());
    }

    #[test]
    fn does_not_inject_a_duplicate_for_an_overlapping_label() {
        let mut ctx = empty_ctx();
        let mut node = Node::new("f1", NodeKind::Factor);
        node.label = Some("customers signed up".to_string());
        ctx.graph.nodes.push(node);

        extract_quantities(&mut ctx, "We expect 800 customers by year end.", None);

        assert_eq!(ctx.graph.nodes_of_kind(NodeKind::Factor).count(), 1);
        assert_eq!(ctx.graph.node("f1").unwrap().factor_value(), Some(0.8));
    }

    #[test]
    fn a_quantity_already_redirected_into_the_goal_threshold_is_not_also_injected_as_a_factor() {
        let mut ctx = empty_ctx();
        let brief = "Target 800 customers by year end.";
        let redirected_span = Some((brief.find("800").unwrap(), brief.find(" by").unwrap()));

        extract_quantities(&mut ctx, brief, redirected_span);

        assert_eq!(ctx.graph.nodes_of_kind(NodeKind::Factor).count(), 0);
    }

    #[test]
    fn a_percentage_already_redirected_into_the_goal_threshold_is_not_also_injected_as_a_factor() {
        let mut ctx = empty_ctx();
        let brief = "Target 15% conversion.";
        let redirected_span = Some((brief.find("15%").unwrap(), brief.find("15%").unwrap() + "15%".len()));

        extract_quantities(&mut ctx, brief, redirected_span);

        assert_eq!(ctx.graph.nodes_of_kind(NodeKind::Factor).count(), 0);
    }
}
