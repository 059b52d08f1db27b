//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate an opaque URL-safe token from `len` random bytes.
///
/// The output is unpadded URL-safe Base64, so it is header and key safe.
/// 32 bytes yields a 43 character token carrying 256 bits of entropy.
pub fn random_token(len: usize) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(random_bytes(len))
}

/// Encode bytes as standard base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode standard base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));
        assert!(random_bytes(0).is_empty());
    }

    #[test]
    fn test_random_token_shape() {
        let token = random_token(32);
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_random_tokens_do_not_repeat() {
        let tokens: HashSet<String> = (0..1000).map(|_| random_token(32)).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_base64_roundtrip() {
        let data = b"alice@example.com:secret123";
        let encoded = to_base64(data);
        assert_eq!(encoded, "YWxpY2VAZXhhbXBsZS5jb206c2VjcmV0MTIz");
        assert_eq!(from_base64(&encoded).unwrap(), data);
    }

    #[test]
    fn test_from_base64_rejects_garbage() {
        assert!(from_base64("***").is_err());
    }
}
