use serde::{Deserialize, Serialize};

/// `quality.overall`: a 1–10 score derived from a confidence
/// value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quality {
    pub overall: u8,
}

impl Quality {
    /// Map a `[0, 1]` confidence onto a `[1, 10]` integer score, rounding to
    /// the nearest point. `confidence` outside `[0, 1]` is clamped first.
    #[must_use]
    pub fn from_confidence(confidence: f64) -> Self {
        let clamped = confidence.clamp(0.0, 1.0);
        let overall = (1.0 + clamped * 9.0).round() as u8;
        Self { overall }
    }
}
