//! Auth Session Entity
//!
//! What a successful login hands back: the opaque token and whose it is.
//! The session store itself only keeps `key -> user id`; the expiry here is
//! informational.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{auth_token::AuthToken, user_id::UserId};

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: AuthToken,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn new(token: AuthToken, user_id: UserId, ttl: std::time::Duration) -> Self {
        let ttl = Duration::from_std(ttl).unwrap_or(Duration::zero());
        Self {
            token,
            user_id,
            expires_at: Utc::now() + ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_is_ttl_from_now() {
        let before = Utc::now();
        let session = AuthSession::new(
            AuthToken::generate(32),
            UserId::new(),
            std::time::Duration::from_secs(86_400),
        );
        let delta = session.expires_at - before;
        assert!(delta >= Duration::seconds(86_400));
        assert!(delta < Duration::seconds(86_410));
    }
}
