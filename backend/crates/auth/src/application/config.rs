//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token lifetime, fixed from issuance (24 hours)
    pub token_ttl: Duration,
    /// Request header carrying the token
    pub token_header: String,
    /// Session-store key prefix
    pub token_key_prefix: String,
    /// Random bytes per token
    pub token_bytes: usize,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(24 * 3600), // 24 hours
            token_header: "X-Token".to_string(),
            token_key_prefix: "auth_".to_string(),
            token_bytes: 32,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    pub fn with_pepper(pepper: Vec<u8>) -> Self {
        Self {
            password_pepper: Some(pepper),
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
