//! Auth Gate Middleware
//!
//! Resolves the token header before a protected handler runs. On success the
//! user id is bound to the request as [`CurrentUser`]; otherwise the request
//! is answered with 401 and the handler never runs.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use platform::http_auth::extract_header;

use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Authenticated user, stored in request extensions
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: UserId,
}

/// Middleware that requires a live token
pub async fn require_auth<U, S>(
    State(state): State<AuthAppState<U, S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let token = extract_header(req.headers(), &state.config.token_header)
        .ok_or(AuthError::Unauthenticated)?;

    let user_id = state.manager.resolve(&token).await?;

    req.extensions_mut().insert(CurrentUser { user_id });

    Ok(next.run(req).await)
}
