//! Resume-specific error responses.
//!
//! These sit outside the closed `CeeErrorCode` taxonomy: `BAD_INPUT` (401)
//! and the `resume=unsupported` upgrade signal (426) are specific to the
//! resume handshake and don't appear in the general error table.

use serde::Serialize;

use crate::token::TokenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFailure {
    /// Signature mismatch. Maps to 401.
    BadSignature,
    /// Expired or unknown stream state. Maps to 426 with
    /// `details.upgrade = "resume=unsupported"`.
    UnknownStream,
}

impl ResumeFailure {
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::BadSignature => 401,
            Self::UnknownStream => 426,
        }
    }

    #[must_use]
    pub const fn is_retryable_with_a_fresh_token(self) -> bool {
        // Both cases tell the client its held token is worthless; the
        // distinction is only in the HTTP status and body shape.
        matches!(self, Self::BadSignature | Self::UnknownStream)
    }
}

impl From<TokenError> for ResumeFailure {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::BadSignature | TokenError::Malformed => Self::BadSignature,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeErrorBody {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ResumeFailure {
    #[must_use]
    pub fn into_body(self) -> ResumeErrorBody {
        match self {
            Self::BadSignature => ResumeErrorBody { code: "BAD_INPUT".to_string(), details: None },
            Self::UnknownStream => ResumeErrorBody {
                code: "CEE_RESUME_UNSUPPORTED".to_string(),
                details: Some(serde_json::json!({ "upgrade": "resume=unsupported" })),
            },
        }
    }
}
