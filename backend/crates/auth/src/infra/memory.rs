//! In-Memory Repository Implementation
//!
//! Same contract as the PostgreSQL repository, kept in process memory.
//! Used by tests and by local runs without a database.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use kernel::id::UserId;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

/// In-memory user repository
///
/// Check-and-insert happens under one lock, mirroring the unique
/// constraint of the SQL schema.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AuthResult<std::sync::MutexGuard<'_, Vec<User>>> {
        self.users
            .lock()
            .map_err(|_| AuthError::Internal("user store lock poisoned".to_string()))
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let users = self.lock()?;
        Ok(users.iter().find(|u| u.user_name == *user_name).cloned())
    }

    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut users = self.lock()?;

        if users.iter().any(|u| u.user_name == user.user_name) {
            return Err(AuthError::UsernameTaken);
        }

        let next_id = users.iter().map(|u| u.user_id.get()).max().unwrap_or(0) + 1;
        let created = User {
            user_id: UserId::from_raw(next_id),
            user_name: user.user_name.clone(),
            display_name: user.display_name.as_ref().map(|n| n.as_str().to_string()),
            password: user.password.clone(),
            created_at: Utc::now(),
        };
        users.push(created.clone());

        Ok(created)
    }

    async fn list_all(&self) -> AuthResult<Vec<User>> {
        let users = self.lock()?;
        Ok(users.clone())
    }
}
