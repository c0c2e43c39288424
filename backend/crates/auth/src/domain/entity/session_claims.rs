//! Session Claims Entity
//!
//! Contents of a signed session token. Stateless: nothing is stored
//! server-side, so a token is valid exactly until `exp`.

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

/// Claims embedded in the session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: i64,
    /// Login name
    pub username: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expires at (Unix seconds)
    pub exp: i64,
}

impl SessionClaims {
    /// Claims for `user`, valid for `ttl_secs` from `now`
    pub fn for_user(user: &User, now: i64, ttl_secs: i64) -> Self {
        Self {
            sub: user.user_id.get(),
            username: user.user_name.as_str().to_string(),
            name: user.display_name.clone(),
            iat: now,
            exp: now.saturating_add(ttl_secs),
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.exp
    }

    /// Name to show in the UI
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}
