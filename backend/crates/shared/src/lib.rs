//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the backend vocabulary:
//! - The unified HTTP-facing error type and its result alias
//! - Typed identifier wrappers
//!
//! Only things whose meaning is identical in every crate belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
