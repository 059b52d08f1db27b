//! Application Layer
//!
//! Use cases and application services.

pub mod app_status;
pub mod config;
pub mod session_manager;
pub mod sign_up;

// Re-exports
pub use app_status::{AppStatusUseCase, StatsOutput, StatusOutput};
pub use config::AuthConfig;
pub use session_manager::SessionManager;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
