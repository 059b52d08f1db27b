//! Session Manager
//!
//! Issues, resolves and revokes session tokens. Holds no mutable state of
//! its own: the token -> user id mapping and its expiry live entirely in the
//! session store.
//!
//! ## Token lifecycle
//! `issued -> valid -> expired | revoked`. Resolving a token never extends
//! its lifetime, and nothing moves a token out of a terminal state.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::value_object::{
    auth_token::AuthToken,
    email::Email,
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct SessionManager<U, S> {
    users: Arc<U>,
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> Clone for SessionManager<U, S> {
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            sessions: self.sessions.clone(),
            config: self.config.clone(),
        }
    }
}

impl<U, S> SessionManager<U, S>
where
    U: UserRepository + Sync,
    S: SessionStore + Sync,
{
    pub fn new(users: Arc<U>, sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        UserPassword::prepare_dummy();
        Self {
            users,
            sessions,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Verify credentials and issue a new token.
    ///
    /// Unknown email and wrong password both fail with `InvalidCredentials`,
    /// and both pay for one Argon2id verification.
    pub async fn authenticate(&self, email: &str, password: String) -> AuthResult<AuthSession> {
        let raw_password = RawPassword::new(password).map_err(|_| AuthError::InvalidCredentials)?;
        let email = Email::new(email).map_err(|_| AuthError::InvalidCredentials)?;

        let pepper = self.config.pepper();
        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                UserPassword::verify_dummy(&raw_password, pepper);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !user.password_hash.verify(&raw_password, pepper) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = AuthToken::generate(self.config.token_bytes);
        self.sessions
            .set(
                &token.storage_key(&self.config.token_key_prefix),
                &user.user_id.to_string(),
                self.config.token_ttl,
            )
            .await?;

        tracing::info!(user_id = %user.user_id, "User authenticated");

        Ok(AuthSession::new(token, user.user_id, self.config.token_ttl))
    }

    /// Map a presented token to its user id
    pub async fn resolve(&self, token: &str) -> AuthResult<UserId> {
        let token = AuthToken::parse(token)?;

        let value = self
            .sessions
            .get(&token.storage_key(&self.config.token_key_prefix))
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        value.parse::<UserId>().map_err(|e| {
            tracing::warn!(error = %e, "Session store holds a malformed user id");
            AuthError::Unauthenticated
        })
    }

    /// Delete a token. A token that is not live fails with `Unauthenticated`.
    pub async fn revoke(&self, token: &str) -> AuthResult<()> {
        let token = AuthToken::parse(token)?;

        let removed = self
            .sessions
            .del(&token.storage_key(&self.config.token_key_prefix))
            .await?;

        if !removed {
            return Err(AuthError::Unauthenticated);
        }

        tracing::info!("Session revoked");
        Ok(())
    }
}
