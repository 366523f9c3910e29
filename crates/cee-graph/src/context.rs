//! `PipelineContext`: the graph plus the accumulated audit trail threaded
//! through every pipeline stage.

use cee_utils::ids::{CorrelationId, RequestId};

use crate::correction::{Correction, FieldDeletion};
use crate::graph::Graph;

/// One entry in the stage trace: which stage ran and whether it changed
/// anything, used for the pipeline-level telemetry event and for the
/// envelope's `trace` attachment.
#[derive(Debug, Clone)]
pub struct StageRecord {
    pub stage: String,
    pub corrections_emitted: usize,
    pub field_deletions_emitted: usize,
}

impl StageRecord {
    #[must_use]
    pub fn new(stage: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            corrections_emitted: 0,
            field_deletions_emitted: 0,
        }
    }
}

/// Carries the in-progress graph plus every correction and field deletion
/// recorded so far, threaded by value through parse → normalise → enrich →
/// repair → package. Each stage takes a `PipelineContext`, mutates
/// `graph` and appends to `corrections`/`field_deletions`, and hands the
/// context to the next stage.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub request_id: RequestId,
    pub correlation_id: CorrelationId,
    pub graph: Graph,
    pub corrections: Vec<Correction>,
    pub field_deletions: Vec<FieldDeletion>,
    pub stage_trace: Vec<StageRecord>,
    /// Factor ids the parser defaulted `data.value` to `1.0` for, recorded
    /// here for later reporting. Consulted by the enricher's early-exit
    /// check and the repair
    /// sweep's idempotent baseline-defaulting stage.
    pub baseline_defaulted_factor_ids: Vec<String>,
    /// Set by the enricher when every option's
    /// `interventions` map is already complete and finite.
    pub extraction_mode: Option<String>,
}

impl PipelineContext {
    #[must_use]
    pub fn new(request_id: RequestId, correlation_id: CorrelationId, graph: Graph) -> Self {
        Self {
            request_id,
            correlation_id,
            graph,
            corrections: Vec::new(),
            field_deletions: Vec::new(),
            stage_trace: Vec::new(),
            baseline_defaulted_factor_ids: Vec::new(),
            extraction_mode: None,
        }
    }

    /// Run `stage_name` via `f`, recording how many corrections and field
    /// deletions it produced in the stage trace. `f` receives `&mut self` so
    /// it can mutate the graph and push onto `corrections`/`field_deletions`
    /// directly.
    pub fn run_stage(&mut self, stage_name: &str, f: impl FnOnce(&mut Self)) {
        let corrections_before = self.corrections.len();
        let deletions_before = self.field_deletions.len();

        f(self);

        let mut record = StageRecord::new(stage_name);
        record.corrections_emitted = self.corrections.len() - corrections_before;
        record.field_deletions_emitted = self.field_deletions.len() - deletions_before;
        self.stage_trace.push(record);
    }

    #[must_use]
    pub fn total_corrections(&self) -> usize {
        self.corrections.len()
    }

    #[must_use]
    pub fn total_field_deletions(&self) -> usize {
        self.field_deletions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correction::{Correction, Layer, Severity};

    #[test]
    fn run_stage_records_counts_in_trace() {
        let graph = Graph::new("v1", 1);
        let mut ctx = PipelineContext::new(
            RequestId::generate(),
            CorrelationId::generate(),
            graph,
        );

        ctx.run_stage("repair.baseline_defaulting", |ctx| {
            ctx.corrections.push(Correction::new(
                "BASELINE_DEFAULTED",
                Layer::Cee,
                "nodes[0].data.baseline",
                "missing baseline defaulted to 1.0",
                Severity::Info,
            ));
            ctx.field_deletions.push(FieldDeletion::new(
                "repair.baseline_defaulting",
                "n1",
                "data.raw_baseline",
                "superseded by defaulted baseline",
            ));
        });

        assert_eq!(ctx.stage_trace.len(), 1);
        assert_eq!(ctx.stage_trace[0].stage, "repair.baseline_defaulting");
        assert_eq!(ctx.stage_trace[0].corrections_emitted, 1);
        assert_eq!(ctx.stage_trace[0].field_deletions_emitted, 1);
        assert_eq!(ctx.total_corrections(), 1);
        assert_eq!(ctx.total_field_deletions(), 1);
    }
}
