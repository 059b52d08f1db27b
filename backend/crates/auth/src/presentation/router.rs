//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth;

/// Create the router over any credential store and session store
pub fn auth_router<U, S>(users: Arc<U>, sessions: Arc<S>, config: AuthConfig) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let state = AuthAppState::new(users, sessions, Arc::new(config));

    let protected = Router::new()
        .route("/users/me", get(handlers::get_me::<U, S>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<U, S>,
        ));

    Router::new()
        .route("/status", get(handlers::get_status::<U, S>))
        .route("/stats", get(handlers::get_stats::<U, S>))
        .route("/users", post(handlers::post_new_user::<U, S>))
        .route("/connect", get(handlers::get_connect::<U, S>))
        .route("/disconnect", get(handlers::get_disconnect::<U, S>))
        .merge(protected)
        .with_state(state)
}
