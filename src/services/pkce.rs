// SPDX-License-Identifier: MIT

//! PKCE (RFC 7636) verifier/challenge generation for the Fitbit OAuth flow.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// PKCE pair for one authorization attempt.
///
/// The verifier stays secret until the code exchange; the challenge goes into
/// the authorization redirect.
#[derive(Debug, Clone)]
pub struct PkcePair {
    pub verifier: String,
    pub challenge: String,
}

impl PkcePair {
    /// Generate a fresh pair: 32 cryptographically random bytes rendered as
    /// hex (64 chars, within the RFC 7636 43-128 range) plus the S256
    /// challenge of that text.
    ///
    /// Panics only if the OS entropy source is unavailable, which is fatal
    /// for the whole flow anyway.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let verifier = hex::encode(bytes);
        let challenge = challenge_for(&verifier);
        Self {
            verifier,
            challenge,
        }
    }

    /// Challenge method sent to the authorize endpoint (always SHA-256).
    pub fn challenge_method() -> &'static str {
        "S256"
    }
}

/// BASE64URL(SHA256(ASCII(verifier))), per RFC 7636.
pub fn challenge_for(verifier: &str) -> String {
    let digest = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_deterministic() {
        let pair = PkcePair::generate();
        // Same verifier must always map to the same challenge
        assert_eq!(pair.challenge, challenge_for(&pair.verifier));
        assert_eq!(challenge_for(&pair.verifier), challenge_for(&pair.verifier));
    }

    #[test]
    fn test_generator_produces_distinct_verifiers() {
        let a = PkcePair::generate();
        let b = PkcePair::generate();
        assert_ne!(a.verifier, b.verifier);
        assert_ne!(a.challenge, b.challenge);
    }

    #[test]
    fn test_verifier_length_in_rfc_range() {
        let pair = PkcePair::generate();
        assert!(pair.verifier.len() >= 43 && pair.verifier.len() <= 128);
    }

    #[test]
    fn test_challenge_is_url_safe() {
        let pair = PkcePair::generate();
        assert!(!pair.challenge.contains('+'));
        assert!(!pair.challenge.contains('/'));
        assert!(!pair.challenge.contains('='));
    }

    #[test]
    fn test_known_challenge_vector() {
        // SHA-256 of "test" -> base64url without padding
        assert_eq!(
            challenge_for("test"),
            "n4bQgYhMfWWaL-qgxVrQFaO_TxsrC4Is0V1sFbDwCgg"
        );
    }
}
