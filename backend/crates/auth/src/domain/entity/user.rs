//! User Entity
//!
//! Administrator account. Created at setup or by another administrator;
//! never updated or deleted.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    display_name::DisplayName, user_name::UserName, user_password::UserPassword,
};

/// User entity (as persisted)
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier
    pub user_id: UserId,
    /// Login name (unique)
    pub user_name: UserName,
    /// Optional display name
    pub display_name: Option<String>,
    /// Argon2id hash
    pub password: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Name to show in the UI: display name, falling back to the login name
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.user_name.as_str())
    }
}

/// A user that has not been persisted yet (no id, no timestamp)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub display_name: Option<DisplayName>,
    pub password: UserPassword,
}
