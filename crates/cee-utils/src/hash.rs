//! SHA-256 helpers used for prompt content hashing and experiment
//! bucketing's deterministic hash-and-modulo scheme.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of `input`.
#[must_use]
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    hex_encode(&digest)
}

/// First 16 bits of the SHA-256 digest, as an unsigned integer — the
/// bucketing primitive: take the first 16 bits, compute modulo 100.
#[must_use]
pub fn sha256_first_u16(input: &str) -> u16 {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    u16::from_be_bytes([digest[0], digest[1]])
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(out, "{byte:02x}").expect("writing to a String cannot fail");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_hex_is_deterministic() {
        assert_eq!(sha256_hex("hello"), sha256_hex("hello"));
        assert_ne!(sha256_hex("hello"), sha256_hex("world"));
        assert_eq!(sha256_hex("hello").len(), 64);
    }

    #[test]
    fn sha256_first_u16_is_deterministic_and_bounded() {
        let a = sha256_first_u16("experiment:user-1");
        let b = sha256_first_u16("experiment:user-1");
        assert_eq!(a, b);
        // u16 is inherently bounded; this just documents the contract.
        assert!(a <= u16::MAX);
    }
}
