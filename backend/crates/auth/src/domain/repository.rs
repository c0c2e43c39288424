//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::user_name::UserName;
use crate::error::AuthResult;

/// User (credential store) repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find the unique user with this name
    async fn find_by_username(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Insert a new user
    ///
    /// Fails with `AuthError::UsernameTaken` when the name already exists.
    /// The check is the store's uniqueness constraint, never a prior read.
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// All users, ordered by id
    async fn list_all(&self) -> AuthResult<Vec<User>>;
}
