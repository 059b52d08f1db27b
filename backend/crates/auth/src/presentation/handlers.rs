//! HTTP Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use platform::http_auth::{extract_basic_credentials, extract_header};

use crate::application::config::AuthConfig;
use crate::application::{AppStatusUseCase, SessionManager, SignUpInput, SignUpUseCase};
use crate::domain::repository::{SessionStore, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ConnectResponse, SignUpRequest, StatsResponse, StatusResponse, UserResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
pub struct AuthAppState<U, S> {
    pub users: Arc<U>,
    pub sessions: Arc<S>,
    pub config: Arc<AuthConfig>,
    pub manager: SessionManager<U, S>,
}

impl<U, S> AuthAppState<U, S>
where
    U: UserRepository + Sync,
    S: SessionStore + Sync,
{
    pub fn new(users: Arc<U>, sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        let manager = SessionManager::new(users.clone(), sessions.clone(), config.clone());
        Self {
            users,
            sessions,
            config,
            manager,
        }
    }
}

// Manual impl: a derive would require `U: Clone` and `S: Clone`
impl<U, S> Clone for AuthAppState<U, S> {
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            sessions: self.sessions.clone(),
            config: self.config.clone(),
            manager: self.manager.clone(),
        }
    }
}

// ============================================================================
// Status / Stats
// ============================================================================

/// GET /status
pub async fn get_status<U, S>(State(state): State<AuthAppState<U, S>>) -> Json<StatusResponse>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let status = AppStatusUseCase::new(state.users.clone(), state.sessions.clone())
        .status()
        .await;

    Json(StatusResponse {
        db: status.db,
        sessions: status.sessions,
    })
}

/// GET /stats
pub async fn get_stats<U, S>(
    State(state): State<AuthAppState<U, S>>,
) -> AuthResult<Json<StatsResponse>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let stats = AppStatusUseCase::new(state.users.clone(), state.sessions.clone())
        .stats()
        .await?;

    Ok(Json(StatsResponse {
        users: stats.users,
        files: stats.files,
    }))
}

// ============================================================================
// Registration
// ============================================================================

/// POST /users
pub async fn post_new_user<U, S>(
    State(state): State<AuthAppState<U, S>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = SignUpUseCase::new(state.users.clone(), state.config.clone());

    let output = use_case
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: output.user_id.to_string(),
            email: output.email.to_string(),
        }),
    ))
}

// ============================================================================
// Connect / Disconnect
// ============================================================================

/// GET /connect
///
/// `Authorization: Basic base64(email:password)` -> `{ "token": ... }`
pub async fn get_connect<U, S>(
    State(state): State<AuthAppState<U, S>>,
    headers: HeaderMap,
) -> AuthResult<Json<ConnectResponse>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let mut credentials =
        extract_basic_credentials(&headers).ok_or(AuthError::InvalidCredentials)?;
    let password = credentials.take_password();

    let session = state
        .manager
        .authenticate(&credentials.username, password)
        .await?;

    Ok(Json(ConnectResponse {
        token: session.token.as_str().to_string(),
    }))
}

/// GET /disconnect
pub async fn get_disconnect<U, S>(
    State(state): State<AuthAppState<U, S>>,
    headers: HeaderMap,
) -> AuthResult<StatusCode>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let token = extract_header(&headers, &state.config.token_header)
        .ok_or(AuthError::Unauthenticated)?;

    state.manager.revoke(&token).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Current User (behind the Auth Gate)
// ============================================================================

/// GET /users/me
pub async fn get_me<U, S>(
    State(state): State<AuthAppState<U, S>>,
    Extension(current): Extension<CurrentUser>,
) -> AuthResult<Json<UserResponse>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    // The account may have been deleted while the token was still live
    let user = state
        .users
        .find_by_id(&current.user_id)
        .await?
        .ok_or(AuthError::Unauthenticated)?;

    Ok(Json(UserResponse {
        id: user.user_id.to_string(),
        email: user.email.to_string(),
    }))
}
