//! Shared primitives for the cee-assist workspace: the closed error taxonomy,
//! trace/engine metadata, content hashing, and tracing setup.
//!
//! Every other crate in the workspace depends on this one for its public
//! error type or for `Trace`/`RequestId`; it must not depend back on them.

pub mod error;
pub mod hash;
pub mod ids;
pub mod logging;
pub mod trace;

pub use error::{CeeError, CeeErrorCode, Recovery};
pub use ids::{CorrelationId, RequestId};
pub use trace::{EngineInfo, Trace};
