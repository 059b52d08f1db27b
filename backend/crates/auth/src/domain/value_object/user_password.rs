//! User Password Value Object
//!
//! Domain wrappers around `platform::password`:
//! - [`RawPassword`] is validated user input, zeroized on drop
//! - [`UserPassword`] is the stored Argon2id PHC hash

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

use crate::error::{AuthError, AuthResult};

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Normalize and validate a password.
    ///
    /// Empty or whitespace-only input is reported as a missing password.
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::EmptyOrWhitespace => AuthError::MissingPassword,
            other => AuthError::InvalidRequest(other.to_string()),
        })?;

        Ok(Self(clear_text))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Hashed password as persisted in the credential store
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password for storage
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        raw.inner()
            .hash(pepper)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Load a stored hash. Anything that is not an Argon2 PHC string is refused.
    pub fn from_db(phc: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    /// Burn one verification when there is no stored hash to check against
    pub fn verify_dummy(raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        HashedPassword::verify_dummy(raw.inner(), pepper)
    }

    /// Hash the stand-in used by `verify_dummy` ahead of the first login
    pub fn prepare_dummy() {
        if HashedPassword::prepare_dummy().is_none() {
            tracing::warn!("Dummy password hash unavailable; unknown-email logins skip verification");
        }
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("secret123".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        assert!(hashed.as_str().starts_with("$argon2id$"));
        assert!(hashed.verify(&raw, None));

        let wrong = RawPassword::new("secret124".to_string()).unwrap();
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_empty_password_is_missing() {
        assert!(matches!(
            RawPassword::new("   ".to_string()),
            Err(AuthError::MissingPassword)
        ));
    }

    #[test]
    fn test_from_db_roundtrip() {
        let raw = RawPassword::new("secret123".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        let loaded = UserPassword::from_db(hashed.as_str()).unwrap();
        assert!(loaded.verify(&raw, None));
    }

    #[test]
    fn test_from_db_rejects_sha1_hex() {
        assert!(UserPassword::from_db("f2b14f68eb995facb3a1c35287b778d5bd785511").is_err());
    }

    #[test]
    fn test_verify_dummy_is_false() {
        let raw = RawPassword::new("secret123".to_string()).unwrap();
        assert!(!UserPassword::verify_dummy(&raw, None));
    }

    #[test]
    fn test_debug_redacted() {
        let raw = RawPassword::new("secret123".to_string()).unwrap();
        assert!(!format!("{:?}", raw).contains("secret123"));
    }
}
