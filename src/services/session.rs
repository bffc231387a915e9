// SPDX-License-Identifier: MIT

//! In-memory session state for the single-user OAuth flow.
//!
//! Replaces the usual process-global token slots with an explicit object
//! behind a mutex, so overlapping requests serialize instead of racing.
//! Nothing is persisted; tokens live for the process lifetime.

use std::sync::Arc;
use tokio::sync::Mutex;

/// Access/refresh token pair. The token endpoint always issues both, so the
/// pair is only ever replaced as a unit.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authorization state for the one supported session.
///
/// The verifier is valid between the /auth redirect and the callback and is
/// consumed exactly once by the code exchange. The token pair is valid from
/// the first successful exchange until replaced by a refresh.
#[derive(Debug, Default)]
pub struct SessionState {
    verifier: Option<String>,
    tokens: Option<TokenPair>,
}

impl SessionState {
    /// Store a new in-flight verifier, replacing any outstanding attempt.
    /// Only one authorization attempt may be outstanding at a time.
    pub fn set_verifier(&mut self, verifier: String) {
        self.verifier = Some(verifier);
    }

    /// Consume the in-flight verifier for the code exchange.
    pub fn take_verifier(&mut self) -> Option<String> {
        self.verifier.take()
    }

    /// Replace the current token pair with a freshly issued one.
    pub fn set_tokens(&mut self, tokens: TokenPair) {
        self.tokens = Some(tokens);
    }

    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access_token.as_str())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.refresh_token.as_str())
    }
}

/// Session state shared across request handlers.
pub type SharedSession = Arc<Mutex<SessionState>>;

/// Create an empty shared session.
pub fn new_shared() -> SharedSession {
    Arc::new(Mutex::new(SessionState::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verifier_consumed_once() {
        let mut session = SessionState::default();
        session.set_verifier("v1".to_string());

        assert_eq!(session.take_verifier(), Some("v1".to_string()));
        assert_eq!(session.take_verifier(), None);
    }

    #[test]
    fn test_new_attempt_overwrites_verifier() {
        let mut session = SessionState::default();
        session.set_verifier("stale".to_string());
        session.set_verifier("fresh".to_string());

        assert_eq!(session.take_verifier(), Some("fresh".to_string()));
    }

    #[test]
    fn test_tokens_replaced_as_a_pair() {
        let mut session = SessionState::default();
        assert!(session.access_token().is_none());

        session.set_tokens(TokenPair {
            access_token: "a1".to_string(),
            refresh_token: "r1".to_string(),
        });
        session.set_tokens(TokenPair {
            access_token: "a2".to_string(),
            refresh_token: "r2".to_string(),
        });

        // Both fields reflect the latest exchange, never a mix
        assert_eq!(session.access_token(), Some("a2"));
        assert_eq!(session.refresh_token(), Some("r2"));
    }
}
