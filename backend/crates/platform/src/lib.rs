//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (CSPRNG tokens, Base64, constant-time compare)
//! - Password hashing (Argon2id)
//! - HTTP credential extraction (Basic auth, token headers)
//! - Retry with bounded exponential backoff for backing stores

pub mod crypto;
pub mod http_auth;
pub mod password;
pub mod retry;
