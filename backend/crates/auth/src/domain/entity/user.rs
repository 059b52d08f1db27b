//! User Entity
//!
//! A registered account: login identifier plus stored password hash.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{email::Email, user_id::UserId, user_password::UserPassword};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Login identifier, unique across users
    pub email: Email,
    /// Argon2id PHC hash
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(email: Email, password_hash: UserPassword) -> Self {
        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
