//! Envelope finaliser: trace/quality/archetype attachment,
//! response caps, and validation issues for the outward-facing response.

mod archetype;
mod caps;
mod envelope;
mod quality;
mod telemetry;
mod validation;

pub use archetype::{classify, Archetype, Confidence, DecisionType, MatchKind};
pub use caps::{ResponseLimits, BIAS_FINDINGS_MAX, EVIDENCE_SUGGESTIONS_MAX, OPTIONS_MAX, SENSITIVITY_SUGGESTIONS_MAX};
pub use envelope::Envelope;
pub use quality::Quality;
pub use validation::{IssueSeverity, ValidationIssue};

pub use telemetry::{failure as telemetry_failure, success as telemetry_success};
