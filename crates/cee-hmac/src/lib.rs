//! HMAC request signing.
//!
//! This crate is deliberately narrow: it builds the canonical string, signs
//! and verifies it, and guards against nonce replay within a clock-skew
//! window. Route wiring, header extraction, and which requests require HMAC
//! at all are left to the caller — those are the out-of-scope "request
//! authentication" surface.

mod nonce;

pub use nonce::{InMemoryNonceStore, NonceStore};

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Default clock-skew tolerance: ±5 minutes (, `cee-config`'s
/// `HMAC_MAX_SKEW_MS` default).
pub const DEFAULT_MAX_SKEW_MS: u64 = 5 * 60 * 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HmacError {
    #[error("signature does not match")]
    BadSignature,
    #[error("timestamp is outside the allowed clock-skew window")]
    ClockSkewExceeded,
    #[error("nonce has already been used within the current window")]
    NonceReplayed,
}

/// The pieces of a request that feed into the canonical string:
/// `METHOD\nPATH\nTIMESTAMP\nNONCE\nSHA256(body_or_empty)`, or the legacy
/// two-field form `METHOD\nPATH\nSHA256(body)` when `timestamp`/`nonce` are
/// absent.
#[derive(Debug, Clone)]
pub struct SignableRequest {
    pub method: String,
    pub path: String,
    pub timestamp_ms: Option<u64>,
    pub nonce: Option<String>,
    pub body: Vec<u8>,
}

impl SignableRequest {
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            timestamp_ms: None,
            nonce: None,
            body,
        }
    }

    #[must_use]
    pub fn with_timestamp_and_nonce(mut self, timestamp_ms: u64, nonce: impl Into<String>) -> Self {
        self.timestamp_ms = Some(timestamp_ms);
        self.nonce = Some(nonce.into());
        self
    }

    fn body_sha256_hex(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.body);
        let digest = hasher.finalize();
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Build the canonical string. Legacy form is used when
    /// neither `timestamp_ms` nor `nonce` is set; the current form is used
    /// otherwise.
    #[must_use]
    pub fn canonical_string(&self) -> String {
        let body_hash = self.body_sha256_hex();
        match (self.timestamp_ms, &self.nonce) {
            (Some(ts), Some(nonce)) => {
                format!("{}\n{}\n{}\n{}\n{}", self.method, self.path, ts, nonce, body_hash)
            }
            _ => format!("{}\n{}\n{}", self.method, self.path, body_hash),
        }
    }
}

/// HMAC-SHA256 over `canonical`, hex-encoded (`X-Olumi-Signature`).
#[must_use]
pub fn sign(secret: &[u8], canonical: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(canonical.as_bytes());
    mac.finalize().into_bytes().iter().map(|b| format!("{b:02x}")).collect()
}

fn verify_signature(secret: &[u8], canonical: &str, signature_hex: &str) -> bool {
    let Ok(expected_bytes) = hex_decode(signature_hex) else {
        return false;
    };
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(canonical.as_bytes());
    mac.verify_slice(&expected_bytes).is_ok()
}

fn hex_decode(s: &str) -> Result<Vec<u8>, ()> {
    if s.len() % 2 != 0 {
        return Err(());
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| ()))
        .collect()
}

/// Verifies signed requests against a secret, a clock-skew bound, and a
/// nonce store guarding against replay.
pub struct Verifier {
    secret: Vec<u8>,
    max_skew_ms: u64,
}

impl Verifier {
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>, max_skew_ms: u64) -> Self {
        Self {
            secret: secret.into(),
            max_skew_ms,
        }
    }

    /// Verify `request` against `signature_hex`, given the current time and
    /// a nonce store. Order: signature first, then (if present) clock skew
    /// and replay — an attacker without the secret can't probe skew/replay
    /// behaviour.
    pub fn verify(
        &self,
        request: &SignableRequest,
        signature_hex: &str,
        now_ms: u64,
        nonce_store: &dyn NonceStore,
    ) -> Result<(), HmacError> {
        let canonical = request.canonical_string();
        if !verify_signature(&self.secret, &canonical, signature_hex) {
            return Err(HmacError::BadSignature);
        }

        if let (Some(ts), Some(nonce)) = (request.timestamp_ms, &request.nonce) {
            let skew = now_ms.abs_diff(ts);
            if skew > self.max_skew_ms {
                return Err(HmacError::ClockSkewExceeded);
            }
            if !nonce_store.try_accept(nonce, now_ms, self.max_skew_ms) {
                return Err(HmacError::NonceReplayed);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nonce::InMemoryNonceStore;

    #[test]
    fn legacy_canonical_string_has_three_fields() {
        let req = SignableRequest::new("POST", "/assist/v1/draft-graph", b"{}".to_vec());
        let canonical = req.canonical_string();
        assert_eq!(canonical.matches('\n').count(), 2);
    }

    #[test]
    fn current_canonical_string_has_five_fields() {
        let req = SignableRequest::new("POST", "/assist/v1/draft-graph", b"{}".to_vec())
            .with_timestamp_and_nonce(1_700_000_000_000, "nonce-1");
        let canonical = req.canonical_string();
        assert_eq!(canonical.matches('\n').count(), 4);
    }

    #[test]
    fn sign_then_verify_succeeds() {
        let secret = b"top-secret";
        let req = SignableRequest::new("POST", "/assist/v1/draft-graph", b"{\"brief\":\"x\"}".to_vec())
            .with_timestamp_and_nonce(1_700_000_000_000, "nonce-1");
        let signature = sign(secret, &req.canonical_string());
        let verifier = Verifier::new(secret.to_vec(), DEFAULT_MAX_SKEW_MS);
        let store = InMemoryNonceStore::new();

        assert!(verifier
            .verify(&req, &signature, 1_700_000_000_500, &store)
            .is_ok());
    }

    #[test]
    fn tampered_body_fails_verification() {
        let secret = b"top-secret";
        let req = SignableRequest::new("POST", "/assist/v1/draft-graph", b"{\"brief\":\"x\"}".to_vec())
            .with_timestamp_and_nonce(1_700_000_000_000, "nonce-1");
        let signature = sign(secret, &req.canonical_string());

        let tampered = SignableRequest::new("POST", "/assist/v1/draft-graph", b"{\"brief\":\"y\"}".to_vec())
            .with_timestamp_and_nonce(1_700_000_000_000, "nonce-1");
        let verifier = Verifier::new(secret.to_vec(), DEFAULT_MAX_SKEW_MS);
        let store = InMemoryNonceStore::new();

        assert_eq!(
            verifier.verify(&tampered, &signature, 1_700_000_000_500, &store),
            Err(HmacError::BadSignature)
        );
    }

    #[test]
    fn skew_outside_window_is_rejected() {
        let secret = b"top-secret";
        let req = SignableRequest::new("POST", "/assist/v1/draft-graph", b"{}".to_vec())
            .with_timestamp_and_nonce(1_700_000_000_000, "nonce-1");
        let signature = sign(secret, &req.canonical_string());
        let verifier = Verifier::new(secret.to_vec(), DEFAULT_MAX_SKEW_MS);
        let store = InMemoryNonceStore::new();

        let far_future = 1_700_000_000_000 + DEFAULT_MAX_SKEW_MS + 1;
        assert_eq!(
            verifier.verify(&req, &signature, far_future, &store),
            Err(HmacError::ClockSkewExceeded)
        );
    }

    #[test]
    fn replayed_nonce_is_rejected_on_second_use() {
        let secret = b"top-secret";
        let req = SignableRequest::new("POST", "/assist/v1/draft-graph", b"{}".to_vec())
            .with_timestamp_and_nonce(1_700_000_000_000, "nonce-1");
        let signature = sign(secret, &req.canonical_string());
        let verifier = Verifier::new(secret.to_vec(), DEFAULT_MAX_SKEW_MS);
        let store = InMemoryNonceStore::new();

        assert!(verifier
            .verify(&req, &signature, 1_700_000_000_500, &store)
            .is_ok());
        assert_eq!(
            verifier.verify(&req, &signature, 1_700_000_000_600, &store),
            Err(HmacError::NonceReplayed)
        );
    }
}
