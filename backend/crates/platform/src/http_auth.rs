//! HTTP Credential Extraction
//!
//! Pulls client credentials out of request headers:
//! - HTTP Basic (RFC 7617): `Authorization: Basic base64(user:password)`
//! - Opaque token headers such as `X-Token`
//!
//! Extraction never fails loudly. A header that is absent, not UTF-8,
//! not Base64 or missing the `:` separator simply yields `None`, and the
//! caller treats that like any other bad credential.

use std::fmt;

use http::{HeaderMap, header};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::from_base64;

/// Credentials decoded from a Basic `Authorization` header
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Move the password out, leaving an empty string to be zeroized
    pub fn take_password(&mut self) -> String {
        std::mem::take(&mut self.password)
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Decode Basic credentials from the `Authorization` header.
///
/// The scheme is matched case-insensitively. The decoded pair is split on
/// the first `:` so that passwords may themselves contain colons. Empty
/// usernames or passwords are rejected.
pub fn extract_basic_credentials(headers: &HeaderMap) -> Option<BasicCredentials> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = from_base64(encoded.trim()).ok()?;
    let mut decoded = String::from_utf8(decoded).ok()?;

    let credentials = decoded.split_once(':').and_then(|(user, pass)| {
        if user.is_empty() || pass.is_empty() {
            None
        } else {
            Some(BasicCredentials {
                username: user.to_string(),
                password: pass.to_string(),
            })
        }
    });

    decoded.zeroize();
    credentials
}

/// Extract a non-empty, trimmed header value
pub fn extract_header(headers: &HeaderMap, name: &str) -> Option<String> {
    let value = headers.get(name)?.to_str().ok()?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
