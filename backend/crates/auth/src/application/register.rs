//! Register Use Case
//!
//! Creates a new administrator account (called by an existing administrator).

use std::sync::Arc;

use kernel::error::field_errors::FieldErrors;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    user_name::UserName,
    user_password::{RawPassword, UserPassword, policy_message},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub username: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let mut errors = FieldErrors::new();

        let display_name = DisplayName::new(&input.name)
            .map_err(|e| errors.add("name", e.to_string()))
            .ok();
        let user_name = UserName::new(&input.username)
            .map_err(|e| errors.add("username", e.to_string()))
            .ok();
        let password = RawPassword::new(input.password)
            .map_err(|e| errors.add("password", policy_message(&e)))
            .ok();

        let (Some(display_name), Some(user_name), Some(password)) =
            (display_name, user_name, password)
        else {
            return Err(AuthError::Validation(errors));
        };

        let password = UserPassword::from_raw(&password, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        // uniqueness is decided by the store, not by a prior lookup
        let user = self
            .user_repo
            .create(&NewUser {
                user_name,
                display_name: Some(display_name),
                password,
            })
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            username = %user.user_name,
            "User registered"
        );

        Ok(user)
    }
}
