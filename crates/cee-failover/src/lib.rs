//! Sequential multi-provider failover over the LLM adapter contract.

pub mod classify;
pub mod error;
pub mod facade;
mod telemetry;

pub use classify::is_retryable_for_failover;
pub use error::FailoverError;
pub use facade::FailoverFacade;

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use cee_graph::Graph;
    use cee_llm::{
        CallOpts, CallResult, ClarifyBriefArgs, ClarifyBriefResult, CritiqueGraphArgs,
        CritiqueGraphResult, DraftGraphArgs, DraftGraphResult, ExplainDiffArgs, ExplainDiffResult,
        LlmAdapter, LlmError, RepairGraphArgs, RepairGraphResult, SuggestOptionsArgs,
        SuggestOptionsResult, Usage,
    };
    use cee_utils::ids::RequestId;

    use super::*;

    struct ScriptedAdapter {
        name: String,
        calls: AtomicUsize,
        outcome: fn() -> Result<Graph, LlmError>,
    }

    impl ScriptedAdapter {
        fn new(name: &str, outcome: fn() -> Result<Graph, LlmError>) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                calls: AtomicUsize::new(0),
                outcome,
            })
        }
    }

    #[async_trait]
    impl LlmAdapter for ScriptedAdapter {
        fn name(&self) -> &str {
            &self.name
        }

        async fn draft_graph(
            &self,
            _args: DraftGraphArgs,
            _opts: &CallOpts,
        ) -> Result<CallResult<DraftGraphResult>, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)().map(|graph| CallResult::new(DraftGraphResult { graph }, Usage::default()))
        }

        async fn suggest_options(
            &self,
            _args: SuggestOptionsArgs,
            _opts: &CallOpts,
        ) -> Result<CallResult<SuggestOptionsResult>, LlmError> {
            unimplemented!()
        }

        async fn repair_graph(
            &self,
            _args: RepairGraphArgs,
            _opts: &CallOpts,
        ) -> Result<CallResult<RepairGraphResult>, LlmError> {
            unimplemented!()
        }

        async fn clarify_brief(
            &self,
            _args: ClarifyBriefArgs,
            _opts: &CallOpts,
        ) -> Result<CallResult<ClarifyBriefResult>, LlmError> {
            unimplemented!()
        }

        async fn critique_graph(
            &self,
            _args: CritiqueGraphArgs,
            _opts: &CallOpts,
        ) -> Result<CallResult<CritiqueGraphResult>, LlmError> {
            unimplemented!()
        }

        async fn explain_diff(
            &self,
            _args: ExplainDiffArgs,
            _opts: &CallOpts,
        ) -> Result<CallResult<ExplainDiffResult>, LlmError> {
            unimplemented!()
        }
    }

    fn opts() -> CallOpts {
        CallOpts::new(RequestId::generate(), 5_000)
    }

    fn args() -> DraftGraphArgs {
        DraftGraphArgs {
            brief: "launch a product".to_string(),
            archetype_hint: None,
            seed: Some(1),
        }
    }

    #[tokio::test]
    async fn falls_over_to_second_adapter_on_retryable_failure() {
        let primary = ScriptedAdapter::new("primary", || Err(LlmError::Transport("down".into())));
        let fallback = ScriptedAdapter::new("fallback", || Ok(Graph::new("v1", 1)));
        let facade = FailoverFacade::new(vec![primary, fallback]);

        let result = facade.draft_graph(args(), &opts()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn stops_immediately_on_non_retryable_failure() {
        let primary = ScriptedAdapter::new("primary", || Err(LlmError::ProviderAuth("nope".into())));
        let fallback = ScriptedAdapter::new("fallback", || Ok(Graph::new("v1", 1)));
        let facade = FailoverFacade::new(vec![primary, Arc::clone(&fallback)]);

        let result = facade.draft_graph(args(), &opts()).await;
        assert!(result.is_err());
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn exhausting_every_adapter_raises_aggregate_error() {
        let primary = ScriptedAdapter::new("primary", || Err(LlmError::Transport("down".into())));
        let fallback = ScriptedAdapter::new("fallback", || Err(LlmError::Timeout {
            duration: std::time::Duration::from_secs(1),
        }));
        let facade = FailoverFacade::new(vec![primary, fallback]);

        let err = facade.draft_graph(args(), &opts()).await.unwrap_err();
        match err {
            FailoverError::AllProvidersFailed { count, .. } => assert_eq!(count, 2),
            other => panic!("expected AllProvidersFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn streaming_with_non_streaming_primary_is_a_config_error() {
        let primary = ScriptedAdapter::new("primary", || Ok(Graph::new("v1", 1)));
        let facade = FailoverFacade::new(vec![primary]);

        let err = facade.stream_draft_graph(args(), &opts()).await.unwrap_err();
        assert!(matches!(err, FailoverError::StreamingUnsupported { .. }));
    }
}
