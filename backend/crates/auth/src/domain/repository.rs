//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use std::time::Duration;

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;

/// Credential store: user records looked up by email or id
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user. Fails with `EmailTaken` if the email is registered.
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Number of registered users
    async fn count(&self) -> AuthResult<i64>;

    /// Number of file records
    async fn count_files(&self) -> AuthResult<i64>;

    /// Round-trip to the backend
    async fn is_alive(&self) -> bool;
}

/// Key-value store with per-key expiry, holding `token key -> user id`
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Store `value` under `key` for `ttl`, replacing any previous value
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AuthResult<()>;

    /// Value of a live key. Expired keys read as absent.
    async fn get(&self, key: &str) -> AuthResult<Option<String>>;

    /// Remove a key. Returns whether a live key was removed.
    async fn del(&self, key: &str) -> AuthResult<bool>;

    /// Whether the backend answers right now
    async fn is_alive(&self) -> bool;
}
