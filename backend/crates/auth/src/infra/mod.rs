//! Infrastructure Layer
//!
//! Database-backed and in-process store implementations.

pub mod memory;
pub mod postgres;

pub use memory::{MemorySessionStore, MemoryUserRepository};
pub use postgres::{PgSessionStore, PgUserRepository};
