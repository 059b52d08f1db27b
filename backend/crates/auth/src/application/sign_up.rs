//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::{Email, EmailError},
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Sign up output
pub struct SignUpOutput {
    pub user_id: UserId,
    pub email: Email,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository + Sync,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // Presence is checked before shape: email first, then password
        let email = input.email.ok_or(AuthError::MissingEmail)?;
        let password = input.password.ok_or(AuthError::MissingPassword)?;

        let email = Email::new(email).map_err(|e| match e {
            EmailError::Empty => AuthError::MissingEmail,
            _ => AuthError::InvalidEmail,
        })?;

        let raw_password = RawPassword::new(password)?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let user = User::new(email, password_hash);

        // A racing duplicate still fails here on the unique index
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            "User signed up"
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
            email: user.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryUserRepository;

    fn use_case() -> (SignUpUseCase<MemoryUserRepository>, Arc<MemoryUserRepository>) {
        let repo = Arc::new(MemoryUserRepository::new());
        let use_case = SignUpUseCase::new(repo.clone(), Arc::new(AuthConfig::default()));
        (use_case, repo)
    }

    fn input(email: Option<&str>, password: Option<&str>) -> SignUpInput {
        SignUpInput {
            email: email.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_sign_up_stores_salted_hash() {
        let (use_case, repo) = use_case();

        let output = use_case
            .execute(input(Some("alice@example.com"), Some("secret123")))
            .await
            .unwrap();
        assert_eq!(output.email.as_str(), "alice@example.com");

        let stored = repo.find_by_id(&output.user_id).await.unwrap().unwrap();
        assert!(stored.password_hash.as_str().starts_with("$argon2id$"));
        assert_ne!(stored.password_hash.as_str(), "secret123");
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let (use_case, _) = use_case();

        assert!(matches!(
            use_case.execute(input(None, Some("secret123"))).await,
            Err(AuthError::MissingEmail)
        ));
        assert!(matches!(
            use_case.execute(input(None, None)).await,
            Err(AuthError::MissingEmail)
        ));
        assert!(matches!(
            use_case.execute(input(Some("alice@example.com"), None)).await,
            Err(AuthError::MissingPassword)
        ));
        assert!(matches!(
            use_case.execute(input(Some("  "), Some("secret123"))).await,
            Err(AuthError::MissingEmail)
        ));
        assert!(matches!(
            use_case.execute(input(Some("alice@example.com"), Some(""))).await,
            Err(AuthError::MissingPassword)
        ));
    }

    #[tokio::test]
    async fn test_invalid_email() {
        let (use_case, _) = use_case();

        assert!(matches!(
            use_case.execute(input(Some("not-an-email"), Some("secret123"))).await,
            Err(AuthError::InvalidEmail)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let (use_case, repo) = use_case();

        use_case
            .execute(input(Some("alice@example.com"), Some("secret123")))
            .await
            .unwrap();

        assert!(matches!(
            use_case
                .execute(input(Some("ALICE@example.com"), Some("other-pass")))
                .await,
            Err(AuthError::EmailTaken)
        ));
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
