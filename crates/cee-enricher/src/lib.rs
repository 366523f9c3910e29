//! Quantitative-signal extraction over the brief, goal-threshold
//! redirection, and factor metadata population.

mod error;
mod extract;
mod metadata;
mod patterns;
mod threshold;

pub use error::EnrichError;

use cee_graph::{NodeKind, PipelineContext};

/// Run the enricher's ordered steps against `ctx.graph`, reading
/// quantitative signals out of `brief`. Steps 3–6 (quantity extraction,
/// normalisation, metadata population, dedup) are skipped once step 2's
/// early-exit fires.
pub fn enrich(ctx: &mut PipelineContext, brief: &str) -> Result<(), EnrichError> {
    if ctx.graph.nodes.is_empty() {
        return Err(EnrichError::EmptyGraph);
    }

    let mut redirected_span = None;
    ctx.run_stage("enrich.goal_threshold_redirection", |ctx| {
        redirected_span = threshold::redirect_goal_threshold(ctx, brief);
    });

    if all_options_fully_specified(ctx) {
        ctx.extraction_mode = Some("v4_complete_skip".to_string());
        return Ok(());
    }

    ctx.run_stage("enrich.quantity_extraction", |ctx| {
        extract::extract_quantities(ctx, brief, redirected_span);
    });

    Ok(())
}

/// Early-exit check: every option's `interventions` map
/// is non-empty and every key resolves to a factor with a finite value.
fn all_options_fully_specified(ctx: &PipelineContext) -> bool {
    let mut options = ctx.graph.nodes_of_kind(NodeKind::Option).peekable();
    if options.peek().is_none() {
        return false;
    }
    options.all(|opt| match opt.interventions() {
        Some(map) if !map.is_empty() => map.keys().all(|factor_id| {
            ctx.graph
                .node(factor_id)
                .and_then(cee_graph::Node::factor_value)
                .is_some_and(f64::is_finite)
        }),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cee_graph::{FactorCategory, Graph, Node};
    use cee_utils::ids::{CorrelationId, RequestId};

    fn ctx(graph: cee_graph::Graph) -> PipelineContext {
        PipelineContext::new(RequestId::generate(), CorrelationId::generate(), graph)
    }

    #[test]
    fn empty_graph_is_an_error() {
        let mut c = ctx(Graph::new("v1", 1));
        assert!(matches!(enrich(&mut c, "anything"), Err(EnrichError::EmptyGraph)));
    }

    #[test]
    fn early_exit_skips_quantity_extraction() {
        let mut graph = Graph::new("v1", 1);
        let mut factor = Node::new("f1", NodeKind::Factor);
        factor.data_mut().category = Some(FactorCategory::Controllable);
        factor.data_mut().value = Some(0.5);
        graph.nodes.push(factor);

        let mut option = Node::new("o1", NodeKind::Option);
        option.data_mut().interventions.insert("f1".to_string(), 1.0);
        graph.nodes.push(option);

        let mut c = ctx(graph);
        enrich(&mut c, "We expect £20k MRR and 800 customers.").unwrap();

        assert_eq!(c.extraction_mode.as_deref(), Some("v4_complete_skip"));
        assert_eq!(c.graph.nodes.len(), 2);
    }

    #[test]
    fn incomplete_interventions_do_not_early_exit() {
        let mut graph = Graph::new("v1", 1);
        graph.nodes.push(Node::new("o1", NodeKind::Option));

        let mut c = ctx(graph);
        enrich(&mut c, "We expect 800 customers by year end.").unwrap();

        assert!(c.extraction_mode.is_none());
        assert!(c.graph.nodes.len() > 1);
    }
}
