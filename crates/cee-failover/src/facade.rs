use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use cee_llm::{
    BoxStream, CallOpts, CallResult, ClarifyBriefArgs, ClarifyBriefResult, CritiqueGraphArgs,
    CritiqueGraphResult, DraftGraphArgs, DraftGraphResult, ExplainDiffArgs, ExplainDiffResult,
    LlmAdapter, LlmError, RepairGraphArgs, RepairGraphResult, SuggestOptionsArgs,
    SuggestOptionsResult,
};

use crate::classify::is_retryable_for_failover;
use crate::error::FailoverError;
use crate::telemetry;

type AdapterFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, LlmError>> + Send + 'a>>;

/// Sequentially invokes an ordered list of adapters for non-streaming
/// capabilities. The first adapter is the primary; the rest
/// are fallbacks tried in order on retryable failure.
pub struct FailoverFacade {
    adapters: Vec<Arc<dyn LlmAdapter>>,
}

impl FailoverFacade {
    #[must_use]
    pub fn new(adapters: Vec<Arc<dyn LlmAdapter>>) -> Self {
        Self { adapters }
    }

    #[must_use]
    pub fn primary(&self) -> Option<&Arc<dyn LlmAdapter>> {
        self.adapters.first()
    }

    /// Run `attempt` across the adapter chain in order, stopping at the
    /// first success, the first non-retryable failure, or after every
    /// adapter has been tried.
    async fn run<T, F>(&self, mut attempt: F) -> Result<T, FailoverError>
    where
        F: for<'a> FnMut(&'a Arc<dyn LlmAdapter>) -> AdapterFuture<'a, T>,
    {
        let Some(primary) = self.primary() else {
            return Err(FailoverError::NoAdapters);
        };
        let primary_name = primary.name().to_string();

        let mut failures: Vec<(String, LlmError)> = Vec::new();

        for (idx, adapter) in self.adapters.iter().enumerate() {
            match attempt(adapter).await {
                Ok(value) => {
                    if idx > 0 {
                        telemetry::failover_success(&primary_name, adapter.name(), &failures);
                    }
                    return Ok(value);
                }
                Err(err) => {
                    let retryable = is_retryable_for_failover(&err);
                    if retryable {
                        if let Some(next) = self.adapters.get(idx + 1) {
                            telemetry::failover(adapter.name(), next.name(), &err);
                        }
                    }
                    failures.push((adapter.name().to_string(), err));
                    if !retryable {
                        break;
                    }
                }
            }
        }

        telemetry::failover_exhausted(&failures);
        Err(FailoverError::all_failed(failures))
    }

    pub async fn draft_graph(
        &self,
        args: DraftGraphArgs,
        opts: &CallOpts,
    ) -> Result<CallResult<DraftGraphResult>, FailoverError> {
        self.run(|adapter| {
            let args = args.clone();
            Box::pin(async move { adapter.draft_graph(args, opts).await })
        })
        .await
    }

    pub async fn suggest_options(
        &self,
        args: SuggestOptionsArgs,
        opts: &CallOpts,
    ) -> Result<CallResult<SuggestOptionsResult>, FailoverError> {
        self.run(|adapter| {
            let args = args.clone();
            Box::pin(async move { adapter.suggest_options(args, opts).await })
        })
        .await
    }

    pub async fn repair_graph(
        &self,
        args: RepairGraphArgs,
        opts: &CallOpts,
    ) -> Result<CallResult<RepairGraphResult>, FailoverError> {
        self.run(|adapter| {
            let args = args.clone();
            Box::pin(async move { adapter.repair_graph(args, opts).await })
        })
        .await
    }

    pub async fn clarify_brief(
        &self,
        args: ClarifyBriefArgs,
        opts: &CallOpts,
    ) -> Result<CallResult<ClarifyBriefResult>, FailoverError> {
        self.run(|adapter| {
            let args = args.clone();
            Box::pin(async move { adapter.clarify_brief(args, opts).await })
        })
        .await
    }

    pub async fn critique_graph(
        &self,
        args: CritiqueGraphArgs,
        opts: &CallOpts,
    ) -> Result<CallResult<CritiqueGraphResult>, FailoverError> {
        self.run(|adapter| {
            let args = args.clone();
            Box::pin(async move { adapter.critique_graph(args, opts).await })
        })
        .await
    }

    pub async fn explain_diff(
        &self,
        args: ExplainDiffArgs,
        opts: &CallOpts,
    ) -> Result<CallResult<ExplainDiffResult>, FailoverError> {
        self.run(|adapter| {
            let args = args.clone();
            Box::pin(async move { adapter.explain_diff(args, opts).await })
        })
        .await
    }

    /// Delegates only to the primary adapter: mid-stream failover is not
    /// attempted, and a primary without streaming support is a
    /// config-level error rather than a silent fallback.
    pub async fn stream_draft_graph(
        &self,
        args: DraftGraphArgs,
        opts: &CallOpts,
    ) -> Result<BoxStream<Result<serde_json::Value, LlmError>>, FailoverError> {
        let Some(primary) = self.primary() else {
            return Err(FailoverError::NoAdapters);
        };
        if !primary.supports_streaming() {
            return Err(FailoverError::StreamingUnsupported {
                provider: primary.name().to_string(),
            });
        }
        primary
            .stream_draft_graph(args, opts)
            .await
            .map_err(|_| FailoverError::StreamingUnsupported {
                provider: primary.name().to_string(),
            })
    }
}
