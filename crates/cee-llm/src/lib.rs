//! Uniform LLM adapter contract.
//!
//! One trait, [`LlmAdapter`], covers every capability the pipeline calls
//! out to an upstream reasoner for. Concrete adapters (HTTP clients, CLI
//! wrappers, test doubles) live outside this crate — it only defines the
//! shape every adapter must expose and the invariants C3's failover facade
//! and C7's orchestrator rely on.

pub mod adapter;
pub mod caps;
pub mod capability;
pub mod error;
pub mod opts;
pub mod usage;

pub use adapter::{BoxStream, LlmAdapter};
pub use caps::{enforce_size_caps, MAX_EDGES, MAX_NODES};
pub use capability::{
    ClarifyBriefArgs, ClarifyBriefResult, CritiqueGraphArgs, CritiqueGraphResult, DraftGraphArgs,
    DraftGraphResult, ExplainDiffArgs, ExplainDiffResult, RepairGraphArgs, RepairGraphResult,
    SuggestOptionsArgs, SuggestOptionsResult,
};
pub use error::LlmError;
pub use opts::{AbortSignal, CallOpts, DiagnosticsCollector};
pub use usage::{CallDiagnostics, CallMetadata, CallResult, Usage};
