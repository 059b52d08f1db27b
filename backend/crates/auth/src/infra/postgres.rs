//! PostgreSQL Store Implementations
//!
//! - [`PgUserRepository`]: the `users` table (plus a count over `files`)
//! - [`PgSessionStore`]: a key-value table with database-clock expiry

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use platform::retry::{RetryPolicy, retry};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::value_object::{email::Email, user_id::UserId, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// User Repository Implementation
// ============================================================================

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                email,
                password_hash,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AuthError::EmailTaken,
            other => AuthError::Database(other),
        })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                email,
                password_hash,
                created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                email,
                password_hash,
                created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn count(&self) -> AuthResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn count_files(&self) -> AuthResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM files")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn is_alive(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// ============================================================================
// Session Store Implementation
// ============================================================================

/// Key-value session store on its own PostgreSQL pool.
///
/// Expiry is computed and checked with the database's `now()`, so every
/// application instance agrees on when a key dies. Expired rows are never
/// returned; [`PgSessionStore::cleanup_expired`] deletes them physically.
pub struct PgSessionStore {
    pool: PgPool,
    policy: RetryPolicy,
}

impl PgSessionStore {
    /// Connect and make sure the table exists
    pub async fn open(database_url: &str) -> AuthResult<Self> {
        let policy = RetryPolicy::default();

        let pool = retry(&policy, "session_store.connect", is_transient, || {
            PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(policy.attempt_timeout)
                .connect(database_url)
        })
        .await
        .map_err(|e| AuthError::StoreUnavailable(e.to_string()))?;

        let store = Self::from_pool(pool, policy);
        store.ensure_schema().await?;

        tracing::info!("Session store opened");
        Ok(store)
    }

    fn from_pool(pool: PgPool, policy: RetryPolicy) -> Self {
        Self { pool, policy }
    }

    /// Close the pool. Later calls fail with `StoreUnavailable`.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Session store closed");
    }

    async fn ensure_schema(&self) -> AuthResult<()> {
        let pool = &self.pool;

        self.run("session_store.schema", move || {
            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS session_store (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    expires_at TIMESTAMPTZ NOT NULL
                )
                "#,
            )
            .execute(pool)
        })
        .await?;

        self.run("session_store.schema", move || {
            sqlx::query(
                "CREATE INDEX IF NOT EXISTS session_store_expires_at_idx ON session_store (expires_at)",
            )
            .execute(pool)
        })
        .await?;

        Ok(())
    }

    /// Delete expired rows
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let pool = &self.pool;

        let deleted = self
            .run("session_store.cleanup", move || {
                sqlx::query("DELETE FROM session_store WHERE expires_at <= now()").execute(pool)
            })
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }

    /// Run one backend call under the retry policy
    async fn run<T, F, Fut>(&self, operation: &str, op: F) -> AuthResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        retry(&self.policy, operation, is_transient, op)
            .await
            .map_err(|e| AuthError::StoreUnavailable(e.to_string()))
    }
}

impl SessionStore for PgSessionStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AuthResult<()> {
        let pool = &self.pool;
        let ttl_secs = ttl.as_secs_f64();

        self.run("session_store.set", move || {
            sqlx::query(
                r#"
                INSERT INTO session_store (key, value, expires_at)
                VALUES ($1, $2, now() + make_interval(secs => $3))
                ON CONFLICT (key) DO UPDATE SET
                    value = EXCLUDED.value,
                    expires_at = EXCLUDED.expires_at
                "#,
            )
            .bind(key)
            .bind(value)
            .bind(ttl_secs)
            .execute(pool)
        })
        .await?;

        Ok(())
    }

    async fn get(&self, key: &str) -> AuthResult<Option<String>> {
        let pool = &self.pool;

        self.run("session_store.get", move || {
            sqlx::query_scalar::<_, String>(
                "SELECT value FROM session_store WHERE key = $1 AND expires_at > now()",
            )
            .bind(key)
            .fetch_optional(pool)
        })
        .await
    }

    async fn del(&self, key: &str) -> AuthResult<bool> {
        let pool = &self.pool;

        let result = self
            .run("session_store.del", move || {
                sqlx::query("DELETE FROM session_store WHERE key = $1 AND expires_at > now()")
                    .bind(key)
                    .execute(pool)
            })
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_alive(&self) -> bool {
        if self.pool.is_closed() {
            return false;
        }
        let ping = sqlx::query("SELECT 1").execute(&self.pool);
        matches!(
            tokio::time::timeout(self.policy.attempt_timeout, ping).await,
            Ok(Ok(_))
        )
    }
}

/// Connection-level failures that a reconnect may cure
fn is_transient(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::WorkerCrashed => true,
        // 08xxx connection exception, 57Pxx operator intervention (e.g. admin shutdown)
        sqlx::Error::Database(db) => db
            .code()
            .is_some_and(|code| code.starts_with("08") || code.starts_with("57P")),
        _ => false,
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            user_id: UserId::from_uuid(self.id),
            email: Email::from_db(self.email),
            password_hash: UserPassword::from_db(self.password_hash)?,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failures_are_transient() {
        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(is_transient(&sqlx::Error::Io(refused)));
        assert!(is_transient(&sqlx::Error::PoolTimedOut));
        assert!(is_transient(&sqlx::Error::WorkerCrashed));
    }

    #[test]
    fn test_other_failures_are_permanent() {
        assert!(!is_transient(&sqlx::Error::RowNotFound));
        assert!(!is_transient(&sqlx::Error::PoolClosed));
        assert!(!is_transient(&sqlx::Error::ColumnNotFound("value".to_string())));
    }

    fn unreachable_store() -> PgSessionStore {
        let policy = RetryPolicy {
            attempt_timeout: Duration::from_millis(200),
            ..RetryPolicy::default()
        };
        // Nothing listens on port 1
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(100))
            .connect_lazy("postgres://user:pw@127.0.0.1:1/db")
            .unwrap();
        PgSessionStore::from_pool(pool, policy)
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_not_alive() {
        let store = unreachable_store();
        assert!(!store.is_alive().await);
    }

    #[tokio::test]
    async fn test_closed_pool_is_not_alive() {
        let store = unreachable_store();
        store.close().await;
        assert!(!store.is_alive().await);
    }

    #[test]
    fn test_legacy_digest_rows_are_refused() {
        let row = UserRow {
            id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            password_hash: "f2b14f68eb995facb3a1c35287b778d5bd785511".to_string(),
            created_at: Utc::now(),
        };
        assert!(matches!(row.into_user(), Err(AuthError::Internal(_))));
    }
}
