//! Domain Layer
//!
//! Contains entities, value objects, and store traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{auth_session::AuthSession, user::User};
pub use repository::{SessionStore, UserRepository};
