//! Sign In Use Case
//!
//! Authenticates a user and issues a session token.

use std::sync::Arc;

use crate::application::check_session::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::{session_claims::SessionClaims, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, verify_against_dummy},
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub username: String,
    pub password: String,
}

/// Sign in output
#[cfg_attr(test, derive(Debug))]
pub struct SignInOutput {
    /// Session token for cookie
    pub session_token: String,
    pub claims: SessionClaims,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Every failure path returns `AuthError::InvalidCredentials` after one
    /// Argon2 verification, whether the user exists or not.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let password = RawPassword::for_sign_in(input.password);

        let user = match self.lookup(&input.username).await? {
            Some(user) => user,
            None => {
                verify_against_dummy(&password, self.config.pepper());
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !user.password.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let (session_token, claims) =
            CheckSessionUseCase::new(self.config.clone()).issue(&user)?;

        tracing::info!(
            user_id = %user.user_id,
            username = %user.user_name,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token,
            claims,
        })
    }

    async fn lookup(&self, username: &str) -> AuthResult<Option<User>> {
        // names that cannot exist are simply "not found"
        match UserName::new(username) {
            Ok(name) => self.user_repo.find_by_username(&name).await,
            Err(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user::NewUser;
    use crate::domain::value_object::user_password::UserPassword;
    use crate::infra::memory::InMemoryUserRepository;

    async fn setup() -> SignInUseCase<InMemoryUserRepository> {
        let repo = InMemoryUserRepository::new();
        let raw = RawPassword::new("password".to_string()).unwrap();
        repo.create(&NewUser {
            user_name: UserName::new("alice").unwrap(),
            display_name: None,
            password: UserPassword::from_raw(&raw, None).unwrap(),
        })
        .await
        .unwrap();

        SignInUseCase::new(Arc::new(repo), Arc::new(AuthConfig::development()))
    }

    fn input(username: &str, password: &str) -> SignInInput {
        SignInInput {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_success() {
        let uc = setup().await;
        let out = uc.execute(input("alice", "password")).await.unwrap();
        assert_eq!(out.claims.username, "alice");
        assert_eq!(out.claims.sub, 1);
        assert!(!out.session_token.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_fail_identically() {
        let uc = setup().await;

        let wrong = uc.execute(input("alice", "not-it")).await.unwrap_err();
        let unknown = uc.execute(input("mallory", "password")).await.unwrap_err();

        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
        assert_eq!(wrong.kind(), unknown.kind());
    }

    #[tokio::test]
    async fn test_blank_credentials_rejected() {
        let uc = setup().await;
        assert!(matches!(
            uc.execute(input("", "")).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            uc.execute(input("alice", "")).await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
