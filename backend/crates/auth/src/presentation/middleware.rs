//! Auth Middleware
//!
//! Access guard for administrative routes. A valid session token puts its
//! [`SessionClaims`] into the request extensions; handlers take them with
//! the `SessionClaims` extractor.

use std::sync::Arc;

use axum::extract::{FromRequestParts, OriginalUri, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::session_claims::SessionClaims;
use crate::error::AuthError;

/// Login page path
pub const LOGIN_PATH: &str = "/auth/login";

/// Where a successful login lands without a usable return target
pub const DEFAULT_AFTER_LOGIN: &str = "/admin";

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub config: Arc<AuthConfig>,
}

impl AuthMiddlewareState {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Claims of the request's session cookie, if valid
    pub fn session_of(&self, headers: &axum::http::HeaderMap) -> Option<SessionClaims> {
        let token = self.config.session_cookie().extract(headers)?;
        CheckSessionUseCase::new(self.config.clone())
            .execute(&token)
            .ok()
    }
}

/// Guard for JSON routes: no session → `401 {"message": "Unauthorized"}`
pub async fn require_api_session(
    State(state): State<AuthMiddlewareState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = state
        .session_of(req.headers())
        .ok_or(AuthError::Unauthenticated)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Guard for HTML routes: no session → `303` to the login page, keeping
/// the requested path as `redirect_to`
pub async fn require_page_session(
    State(state): State<AuthMiddlewareState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(claims) = state.session_of(req.headers()) else {
        // Inside a nested router `uri()` has lost its prefix
        let uri = req
            .extensions()
            .get::<OriginalUri>()
            .map(|original| &original.0)
            .unwrap_or(req.uri());
        let requested = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

        tracing::debug!(path = %requested, "Redirecting unauthenticated request to login");
        return Redirect::to(&login_redirect_url(requested)).into_response();
    };

    req.extensions_mut().insert(claims);

    next.run(req).await
}

/// `/auth/login?redirect_to=<url-encoded path>`
pub fn login_redirect_url(requested: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(requested.as_bytes()).collect();
    format!("{LOGIN_PATH}?redirect_to={encoded}")
}

/// Return target after login: only local paths are followed
///
/// A local path starts with `/` but not `//` or `/\` (both are read as
/// protocol-relative URLs by browsers).
pub fn safe_redirect_target(candidate: Option<&str>) -> &str {
    match candidate {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\") =>
        {
            path
        }
        _ => DEFAULT_AFTER_LOGIN,
    }
}

impl<S> FromRequestParts<S> for SessionClaims
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionClaims>()
            .cloned()
            .ok_or(AuthError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_url_encodes_path() {
        assert_eq!(
            login_redirect_url("/admin/donations"),
            "/auth/login?redirect_to=%2Fadmin%2Fdonations"
        );
        assert_eq!(
            login_redirect_url("/admin/donations?page=2"),
            "/auth/login?redirect_to=%2Fadmin%2Fdonations%3Fpage%3D2"
        );
    }

    #[test]
    fn test_safe_redirect_target() {
        assert_eq!(safe_redirect_target(Some("/admin/donations")), "/admin/donations");
        assert_eq!(safe_redirect_target(None), "/admin");
        assert_eq!(safe_redirect_target(Some("https://evil.example")), "/admin");
        assert_eq!(safe_redirect_target(Some("//evil.example")), "/admin");
        assert_eq!(safe_redirect_target(Some("/\\evil.example")), "/admin");
        assert_eq!(safe_redirect_target(Some("")), "/admin");
    }
}
