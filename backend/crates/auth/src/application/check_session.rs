//! Check Session Use Case
//!
//! Issues and verifies signed session tokens.
//!
//! Token: `base64url(JSON claims) "." base64url(HMAC-SHA256)`.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::{session_claims::SessionClaims, user::User};
use crate::error::{AuthError, AuthResult};

/// Check session use case
#[derive(Clone)]
pub struct CheckSessionUseCase {
    config: Arc<AuthConfig>,
}

impl CheckSessionUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Verify `token` and return its claims
    ///
    /// Any malformed, forged or expired token is `AuthError::Unauthenticated`.
    pub fn execute(&self, token: &str) -> AuthResult<SessionClaims> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    /// Sign a fresh token for `user`
    pub fn issue(&self, user: &User) -> AuthResult<(String, SessionClaims)> {
        let claims = SessionClaims::for_user(
            user,
            chrono::Utc::now().timestamp(),
            self.config.session_ttl_secs(),
        );
        let token = self.sign(&claims)?;
        Ok((token, claims))
    }

    pub(crate) fn sign(&self, claims: &SessionClaims) -> AuthResult<String> {
        let payload = serde_json::to_vec(claims)
            .map_err(|e| AuthError::Internal(format!("Failed to encode session claims: {e}")))?;
        Ok(platform::crypto::sign_token(
            &self.config.session_secret,
            &payload,
        ))
    }

    pub(crate) fn verify_at(&self, token: &str, now: i64) -> AuthResult<SessionClaims> {
        let payload = platform::crypto::verify_token(&self.config.session_secret, token)
            .ok_or(AuthError::Unauthenticated)?;

        let claims: SessionClaims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::Unauthenticated)?;

        if claims.is_expired(now) {
            return Err(AuthError::Unauthenticated);
        }

        Ok(claims)
    }
}
