//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::entity::{session_claims::SessionClaims, user::User};

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
///
/// Missing or non-string fields deserialize as empty and fail as invalid
/// credentials.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub password: String,
}

/// Sign in response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub message: String,
    pub user: SessionUser,
}

/// User as seen through the session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
}

impl From<&SessionClaims> for SessionUser {
    fn from(claims: &SessionClaims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username.clone(),
            name: claims.name.clone(),
        }
    }
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
    /// Unix seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

// ============================================================================
// Register
// ============================================================================

/// Register request
///
/// A missing or non-string field reads as empty, so it fails the field's
/// length rule.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub password: String,
}

/// Register response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Public view of a stored user (never the hash)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.get(),
            username: user.user_name.as_str().to_string(),
            name: user.display_name.clone(),
            created_at: user.created_at,
        }
    }
}

/// Any JSON value; only strings keep their content
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => text,
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_string_fields_read_as_empty() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "name": 1,
            "username": ["bob"],
            "password": null
        }))
        .unwrap();
        assert_eq!(req.name, "");
        assert_eq!(req.username, "");
        assert_eq!(req.password, "");

        let req: SignInRequest =
            serde_json::from_value(serde_json::json!({"username": "alice", "password": 42}))
                .unwrap();
        assert_eq!(req.username, "alice");
        assert_eq!(req.password, "");
    }
}
