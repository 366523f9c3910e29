//! Unified pipeline orchestrator: parse → normalise → enrich →
//! repair → package → boundary, with stage failures mapped onto the closed
//! error taxonomy and a config-gated legacy entry point.

mod error;
mod telemetry;

pub use error::{PipelineError, LEGACY_PIPELINE_DISABLED_MESSAGE};

use cee_config::Config;
use cee_graph::PipelineContext;
use cee_utils::ids::{CorrelationId, RequestId};

/// Run parse → normalise → enrich → repair against a raw upstream JSON
/// payload, returning the fully-repaired [`PipelineContext`] ready for the
/// envelope finaliser's package/boundary step.
///
/// `cee-parser::parse` folds "parse" and "normalise" into one call (kind
/// canonicalisation, edge-shape unification, baseline defaulting, and
/// canonical sorting are all normalisation-layer concerns applied before
/// the graph is ever handed further down the pipeline), so this
/// orchestrator treats them as a single stage rather than threading an
/// empty second stage through for its own sake.
pub fn run(
    raw: serde_json::Value,
    brief: &str,
    request_id: RequestId,
    correlation_id: CorrelationId,
) -> Result<PipelineContext, PipelineError> {
    let mut ctx = cee_parser::parse(raw, request_id, correlation_id).inspect_err(|e| {
        telemetry::stage_failed("parse_normalise", e);
    })?;

    cee_enricher::enrich(&mut ctx, brief).inspect_err(|e| {
        telemetry::stage_failed("enrich", e);
    })?;

    cee_repair::repair(&mut ctx);

    telemetry::stage_complete(&ctx);
    Ok(ctx)
}

/// Entry point for the legacy pipeline path, gated behind
/// `CEE_LEGACY_PIPELINE_ENABLED` ("A legacy code path must be
/// gated behind a configuration flag; when disabled, entry points fail with
/// a stable, greppable message").
pub fn run_legacy(
    config: &Config,
    raw: serde_json::Value,
    brief: &str,
    request_id: RequestId,
    correlation_id: CorrelationId,
) -> Result<PipelineContext, PipelineError> {
    if !config.legacy_pipeline_enabled {
        telemetry::legacy_pipeline_rejected();
        return Err(PipelineError::LegacyPipelineDisabled);
    }
    run(raw, brief, request_id, correlation_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn ids() -> (RequestId, CorrelationId) {
        (RequestId::generate(), CorrelationId::generate())
    }

    fn raw_graph() -> serde_json::Value {
        json!({
            "version": "v1",
            "seed": 1,
            "nodes": [
                {"id": "g1", "kind": "goal"},
                {"id": "f1", "kind": "factor", "data": {"category": "controllable"}},
                {"id": "o1", "kind": "option", "data": {"interventions": {"f1": 1.0}}},
            ],
            "edges": [
                {"id": "e1", "from": "o1", "to": "f1", "strength_mean": 0.5, "exists_probability": 0.9},
            ],
        })
    }

    #[test]
    fn runs_full_pipeline_end_to_end() {
        let (req, corr) = ids();
        let ctx = run(raw_graph(), "Target 800 customers.", req, corr).unwrap();

        assert!(ctx.graph.is_dag());
        assert_eq!(ctx.graph.node("g1").unwrap().data.as_ref().unwrap().goal_threshold_raw, Some(800.0));
        assert!(!ctx.stage_trace.is_empty());
    }

    #[test]
    fn legacy_path_rejects_when_disabled() {
        let config = Config::from_env(&cee_config::MapEnv(HashMap::new()), &[]);
        let (req, corr) = ids();
        let err = run_legacy(&config, raw_graph(), "brief", req, corr).unwrap_err();
        assert!(matches!(err, PipelineError::LegacyPipelineDisabled));
    }

    #[test]
    fn legacy_path_runs_when_enabled() {
        let mut env = HashMap::new();
        env.insert("CEE_LEGACY_PIPELINE_ENABLED".to_string(), "true".to_string());
        let config = Config::from_env(&cee_config::MapEnv(env), &[]);
        let (req, corr) = ids();
        assert!(run_legacy(&config, raw_graph(), "brief", req, corr).is_ok());
    }

    #[test]
    fn parse_failure_maps_through_pipeline_error() {
        let (req, corr) = ids();
        let err = run(serde_json::Value::Null, "brief", req, corr).unwrap_err();
        assert!(matches!(err, PipelineError::Parse(_)));
    }
}
