//! The decision graph data model.
//!
//! `Graph`/`Node`/`Edge` are the canonical in-memory shapes every pipeline
//! stage (C4–C7) reads and mutates. Unknown fields on any of the three are
//! preserved via `#[serde(flatten)]` into an `extra` map, so a stage that
//! doesn't know about a field can't accidentally drop it.

pub mod context;
pub mod correction;
pub mod edge;
pub mod graph;
pub mod node;

pub use context::PipelineContext;
pub use correction::{Correction, FieldDeletion, Layer, Severity};
pub use edge::{EffectDirection, Edge};
pub use graph::{Graph, GraphMetadata};
pub use node::{ExtractionType, FactorCategory, FactorType, Node, NodeData, NodeKind};
