//! App Status Use Case
//!
//! Liveness of both backing stores and record counts.

use std::sync::Arc;

use crate::domain::repository::{SessionStore, UserRepository};
use crate::error::AuthResult;

pub struct StatusOutput {
    pub db: bool,
    pub sessions: bool,
}

pub struct StatsOutput {
    pub users: i64,
    pub files: i64,
}

pub struct AppStatusUseCase<U, S> {
    user_repo: Arc<U>,
    session_store: Arc<S>,
}

impl<U, S> AppStatusUseCase<U, S>
where
    U: UserRepository + Sync,
    S: SessionStore + Sync,
{
    pub fn new(user_repo: Arc<U>, session_store: Arc<S>) -> Self {
        Self {
            user_repo,
            session_store,
        }
    }

    pub async fn status(&self) -> StatusOutput {
        StatusOutput {
            db: self.user_repo.is_alive().await,
            sessions: self.session_store.is_alive().await,
        }
    }

    pub async fn stats(&self) -> AuthResult<StatsOutput> {
        Ok(StatsOutput {
            users: self.user_repo.count().await?,
            files: self.user_repo.count_files().await?,
        })
    }
}
