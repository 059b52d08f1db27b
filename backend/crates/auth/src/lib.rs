//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, store traits
//! - `application/` - Session Manager and the other use cases
//! - `infra/` - PostgreSQL and in-memory store implementations
//! - `presentation/` - HTTP handlers, DTOs, Auth Gate middleware, router
//!
//! ## Session Model
//! - Login with HTTP Basic `email:password` issues an opaque random token
//! - The session store maps `auth_<token>` to the user id with a fixed 24h TTL
//! - Protected routes resolve the `X-Token` header through the Auth Gate
//! - Logout deletes the mapping; expiry is enforced by the store itself
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (salted, memory-hard)
//! - Unknown-email and wrong-password failures are indistinguishable
//! - Every authentication failure renders as the same 401 body

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::session_manager::SessionManager;
pub use error::{AuthError, AuthResult};
pub use infra::memory::{MemorySessionStore, MemoryUserRepository};
pub use infra::postgres::{PgSessionStore, PgUserRepository};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
