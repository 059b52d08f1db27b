//! Password Hashing and Verification
//!
//! Salted, deliberately slow password handling:
//! - Argon2id hashing (memory-hard, per-hash random salt, PHC storage format)
//! - Constant-time verification (the hash is re-derived and compared by argon2)
//! - Zeroization of plaintext buffers
//! - Optional application-wide pepper
//!
//! Fast unsalted digests are never accepted as stored hashes:
//! [`HashedPassword::from_phc_string`] only admits valid PHC strings.

use std::fmt;
use std::sync::OnceLock;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Constants
// ============================================================================

/// Upper bound on password length, in Unicode code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password input rejected before hashing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Not `Clone`, and `Debug` is redacted, so the plaintext cannot leak into
/// logs or linger in copies.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Normalize (NFKC) and validate user input.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw);
        let normalized: String = raw.nfkc().collect();
        let normalized = Self(normalized);

        if normalized.0.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.0.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Space, tab and newline are allowed; other control characters are not
        if normalized
            .0
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(normalized)
    }

    #[cfg(test)]
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash the password using Argon2id with a fresh random salt
    ///
    /// `pepper` must be the same value later passed to [`HashedPassword::verify`].
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let password_bytes = self.peppered(pepper);

        // 128-bit salt
        let salt = SaltString::generate(&mut OsRng);

        // argon2 defaults: Argon2id, m=19456 (19 MiB), t=2, p=1
        let hash = Argon2::default()
            .hash_password(&password_bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

static DUMMY: OnceLock<Option<HashedPassword>> = OnceLock::new();

/// Hashed password in PHC string format
///
/// The PHC string carries algorithm, version, cost parameters, salt and
/// digest, so verification needs nothing but this value and the pepper.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// The candidate is re-hashed with the stored salt and parameters, and the
    /// digests are compared in constant time inside argon2. A malformed stored
    /// hash verifies as `false`.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let password_bytes = password.peppered(pepper);

        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok()
    }

    /// Spend one full verification on a throwaway hash.
    ///
    /// Called when no stored hash exists for the presented identity, so that
    /// path costs the same as a real mismatch. Always returns `false`.
    pub fn verify_dummy(password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        if let Some(dummy) = Self::prepare_dummy() {
            let _ = dummy.verify(password, pepper);
        }
        false
    }

    /// Build the throwaway hash used by [`HashedPassword::verify_dummy`].
    ///
    /// Call once at startup so the first unknown-identity login does not
    /// also pay for hashing. Later calls are free.
    pub fn prepare_dummy() -> Option<&'static HashedPassword> {
        DUMMY
            .get_or_init(|| {
                ClearTextPassword("dummy-password-never-matches".to_string())
                    .hash(None)
                    .ok()
            })
            .as_ref()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_too_long() {
        let long_password = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        let result = ClearTextPassword::new(long_password);
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_empty() {
        let result = ClearTextPassword::new("".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_password_whitespace_only() {
        let result = ClearTextPassword::new("   \t ".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_password_control_character() {
        let result = ClearTextPassword::new("secret\u{0007}123".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::InvalidCharacter)));
    }

    #[test]
    fn test_short_passwords_are_accepted() {
        assert!(ClearTextPassword::new("secret123".to_string()).is_ok());
        assert!(ClearTextPassword::new("x".to_string()).is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new_unchecked("secret123".to_string());
        let hashed = password.hash(None).unwrap();

        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hashed.verify(&password, None));

        let wrong_password = ClearTextPassword::new_unchecked("wrongpass".to_string());
        assert!(!hashed.verify(&wrong_password, None));
    }

    #[test]
    fn test_hash_is_salted() {
        let password = ClearTextPassword::new_unchecked("secret123".to_string());
        let first = password.hash(None).unwrap();
        let second = password.hash(None).unwrap();

        assert_ne!(first.as_phc_string(), second.as_phc_string());
        assert!(first.verify(&password, None));
        assert!(second.verify(&password, None));
    }

    #[test]
    fn test_hash_with_pepper() {
        let password = ClearTextPassword::new_unchecked("secret123".to_string());
        let pepper = b"my_secret_pepper";
        let hashed = password.hash(Some(pepper)).unwrap();

        assert!(hashed.verify(&password, Some(pepper)));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"wrong_pepper")));
    }

    #[test]
    fn test_unicode_normalization_is_applied_on_both_sides() {
        // U+FB01 (ligature "fi") normalizes to "fi" under NFKC
        let ligature = ClearTextPassword::new("\u{FB01}nal-answer".to_string()).unwrap();
        let hashed = ligature.hash(None).unwrap();

        let plain = ClearTextPassword::new("final-answer".to_string()).unwrap();
        assert!(hashed.verify(&plain, None));
    }

    #[test]
    fn test_phc_string_restore() {
        let password = ClearTextPassword::new_unchecked("secret123".to_string());
        let hashed = password.hash(None).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&password, None));
    }

    #[test]
    fn test_raw_digest_is_not_a_hash() {
        // SHA-1 hex of "secret123"
        let result = HashedPassword::from_phc_string("f2b14f68eb995facb3a1c35287b778d5bd785511");
        assert!(matches!(result, Err(PasswordHashError::InvalidHashFormat)));
    }

    #[test]
    fn test_verify_dummy_never_matches() {
        let password = ClearTextPassword::new_unchecked("dummy-password-never-matches".to_string());
        assert!(!HashedPassword::verify_dummy(&password, None));
        assert!(!HashedPassword::verify_dummy(&password, Some(b"pepper")));
        let other = ClearTextPassword::new_unchecked("secret123".to_string());
        assert!(!HashedPassword::verify_dummy(&other, None));
    }

    #[test]
    fn test_dummy_hash_is_built_before_first_use() {
        let prepared = HashedPassword::prepare_dummy().unwrap();
        assert!(DUMMY.get().is_some_and(|d| d.is_some()));
        assert!(prepared.as_phc_string().starts_with("$argon2id$"));

        let again = HashedPassword::prepare_dummy().unwrap();
        assert!(std::ptr::eq(prepared, again));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new_unchecked("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hashed = password.hash(None).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2"));
    }
}
