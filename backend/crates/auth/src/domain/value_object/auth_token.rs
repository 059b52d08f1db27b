//! Auth Token Value Object
//!
//! Opaque bearer token handed to the client at login. Only its session-store
//! key (`<prefix><token>`) ever reaches the store.

use std::fmt;

use crate::error::{AuthError, AuthResult};

/// Anything longer cannot have been issued by us
const MAX_TOKEN_LENGTH: usize = 512;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AuthToken(String);

impl AuthToken {
    /// Generate a fresh token from `bytes` CSPRNG bytes (URL-safe Base64)
    pub fn generate(bytes: usize) -> Self {
        Self(platform::crypto::random_token(bytes))
    }

    /// Accept a client-presented token.
    ///
    /// Only shape is checked here; whether the token is live is the
    /// session store's business.
    pub fn parse(raw: &str) -> AuthResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.len() > MAX_TOKEN_LENGTH {
            return Err(AuthError::Unauthenticated);
        }
        Ok(Self(raw.to_string()))
    }

    /// Session-store key for this token
    pub fn storage_key(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        let a = AuthToken::generate(32);
        let b = AuthToken::generate(32);
        assert_ne!(a, b);
        // 32 bytes -> 43 base64url chars without padding
        assert_eq!(a.as_str().len(), 43);
        assert!(
            a.as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_storage_key() {
        let token = AuthToken::parse("abc123").unwrap();
        assert_eq!(token.storage_key("auth_"), "auth_abc123");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert!(matches!(AuthToken::parse(""), Err(AuthError::Unauthenticated)));
        assert!(matches!(AuthToken::parse("  "), Err(AuthError::Unauthenticated)));
        let huge = "a".repeat(MAX_TOKEN_LENGTH + 1);
        assert!(matches!(AuthToken::parse(&huge), Err(AuthError::Unauthenticated)));
    }

    #[test]
    fn test_debug_redacted() {
        let token = AuthToken::parse("abc123").unwrap();
        assert!(!format!("{:?}", token).contains("abc123"));
    }
}
