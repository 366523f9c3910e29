//! Prompt resolution: TTL cache with background refresh, experiment
//! bucketing, and staging support.
//!
//! `cee-prompt` holds the data model; this crate implements the
//! `getSystemPrompt`/`getSystemPromptAsync` contract on top of a caller-
//! supplied [`PromptSource`] (the out-of-scope "persistence backend for
//! prompt storage").

pub mod cache;
pub mod context;
pub mod error;
pub mod source;
pub mod telemetry;
pub mod warmup;

pub use cache::PromptCache;
pub use context::ResolutionContext;
pub use error::PromptCacheError;
pub use source::{InMemoryPromptSource, PromptSource};
pub use telemetry::CacheMissReason;
pub use warmup::WarmupStats;
