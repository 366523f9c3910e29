use std::pin::Pin;

use async_trait::async_trait;
use tokio_stream::Stream;

use crate::capability::{
    ClarifyBriefArgs, ClarifyBriefResult, CritiqueGraphArgs, CritiqueGraphResult, DraftGraphArgs,
    DraftGraphResult, ExplainDiffArgs, ExplainDiffResult, RepairGraphArgs, RepairGraphResult,
    SuggestOptionsArgs, SuggestOptionsResult,
};
use crate::error::LlmError;
use crate::opts::CallOpts;
use crate::usage::CallResult;

pub type BoxStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

/// A uniform polymorphic interface over every upstream-reasoner capability
/// the pipeline needs. Concrete adapters (one per upstream
/// provider) implement this once; `cee-failover` fans out across an
/// ordered list of them, and `cee-pipeline`/`cee-enricher`/`cee-repair`
/// call capabilities by name without knowing which provider answered.
///
/// Implementors must uphold the adapter invariants: canonical
/// node/edge ordering on any returned graph, stable ids across retries for
/// the same `(brief, seed)`, and size caps enforced via
/// [`crate::enforce_size_caps`] regardless of what the upstream actually
/// returned.
#[async_trait]
pub trait LlmAdapter: Send + Sync {
    /// Stable identifier used in failover telemetry.
    fn name(&self) -> &str;

    /// Whether [`Self::stream_draft_graph`] is implemented. The failover
    /// facade consults this before attempting a streaming call: if the
    /// primary does not support streaming, the call fails with a
    /// config-level error.
    fn supports_streaming(&self) -> bool {
        false
    }

    async fn draft_graph(
        &self,
        args: DraftGraphArgs,
        opts: &CallOpts,
    ) -> Result<CallResult<DraftGraphResult>, LlmError>;

    async fn suggest_options(
        &self,
        args: SuggestOptionsArgs,
        opts: &CallOpts,
    ) -> Result<CallResult<SuggestOptionsResult>, LlmError>;

    async fn repair_graph(
        &self,
        args: RepairGraphArgs,
        opts: &CallOpts,
    ) -> Result<CallResult<RepairGraphResult>, LlmError>;

    async fn clarify_brief(
        &self,
        args: ClarifyBriefArgs,
        opts: &CallOpts,
    ) -> Result<CallResult<ClarifyBriefResult>, LlmError>;

    async fn critique_graph(
        &self,
        args: CritiqueGraphArgs,
        opts: &CallOpts,
    ) -> Result<CallResult<CritiqueGraphResult>, LlmError>;

    async fn explain_diff(
        &self,
        args: ExplainDiffArgs,
        opts: &CallOpts,
    ) -> Result<CallResult<ExplainDiffResult>, LlmError>;

    /// Streamed variant of `draft_graph`. Optional per
    /// (`streamDraftGraph?`); adapters that don't support it should leave
    /// `supports_streaming` at `false` and the default error here in
    /// place.
    async fn stream_draft_graph(
        &self,
        _args: DraftGraphArgs,
        _opts: &CallOpts,
    ) -> Result<BoxStream<Result<serde_json::Value, LlmError>>, LlmError> {
        Err(LlmError::Unsupported(format!(
            "{} does not support streamed draft-graph calls",
            self.name()
        )))
    }
}
