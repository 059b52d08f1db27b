//! In-Memory Store Implementations
//!
//! Process-local stores for development and tests. Session expiry uses
//! `tokio::time::Instant`, so paused test time drives it deterministically.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::domain::entity::user::User;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// User Repository
// ============================================================================

/// In-memory credential store. Holds no file records.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        users.insert(user.user_id, user.clone());

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn count(&self) -> AuthResult<i64> {
        let users = self.users.read().await;
        Ok(users.len() as i64)
    }

    async fn count_files(&self) -> AuthResult<i64> {
        Ok(0)
    }

    async fn is_alive(&self) -> bool {
        true
    }
}

// ============================================================================
// Session Store
// ============================================================================

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory key-value store with per-key deadlines
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, Entry>>,
    open: AtomicBool,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            open: AtomicBool::new(true),
        }
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop serving. Later calls fail with `StoreUnavailable`.
    pub fn close(&self) {
        self.open.store(false, Ordering::Relaxed);
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    /// Drop expired entries, returning how many were removed
    pub fn cleanup_expired(&self) -> AuthResult<usize> {
        let mut entries = self.lock()?;
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        Ok(before - entries.len())
    }

    fn lock(&self) -> AuthResult<MutexGuard<'_, HashMap<String, Entry>>> {
        if !self.open.load(Ordering::Relaxed) {
            return Err(AuthError::StoreUnavailable("session store is closed".to_string()));
        }
        self.entries
            .lock()
            .map_err(|_| AuthError::StoreUnavailable("session store lock poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AuthResult<()> {
        let mut entries = self.lock()?;
        let now = Instant::now();

        // Writes sweep dead keys so abandoned tokens cannot pile up
        entries.retain(|_, entry| entry.is_live(now));
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> AuthResult<Option<String>> {
        let mut entries = self.lock()?;
        let now = Instant::now();

        let lookup = entries
            .get(key)
            .map(|entry| entry.is_live(now).then(|| entry.value.clone()));

        match lookup {
            Some(Some(value)) => Ok(Some(value)),
            Some(None) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn del(&self, key: &str) -> AuthResult<bool> {
        let mut entries = self.lock()?;
        let now = Instant::now();
        Ok(entries.remove(key).is_some_and(|entry| entry.is_live(now)))
    }

    async fn is_alive(&self) -> bool {
        self.open.load(Ordering::Relaxed)
    }
}
