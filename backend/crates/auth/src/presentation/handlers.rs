//! HTTP Handlers

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, RegisterInput, RegisterUseCase, SignInInput, SignInUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    RegisterRequest, RegisterResponse, SessionStatusResponse, SessionUser, SignInRequest,
    SignInResponse, UserResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: `R` itself need not be `Clone` behind the `Arc`.
impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    body: Bytes,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let req: SignInRequest = parse_body(&body)?;

    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    let cookie = state
        .config
        .session_cookie()
        .set_cookie_header(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignInResponse {
            message: "Signed in successfully".to_string(),
            user: SessionUser::from(&output.claims),
        }),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/signout
///
/// Tokens are stateless, so signing out only clears the cookie.
pub async fn sign_out<R>(State(state): State<AuthAppState<R>>) -> impl IntoResponse
where
    R: UserRepository + Send + Sync + 'static,
{
    let cookie = state.config.session_cookie().delete_cookie_header();

    (StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)])
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/session
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> Json<SessionStatusResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let claims = current_session(&state.config, &headers);

    Json(match claims {
        Some(claims) => SessionStatusResponse {
            authenticated: true,
            user: Some(SessionUser::from(&claims)),
            expires_at: Some(claims.exp),
        },
        None => SessionStatusResponse {
            authenticated: false,
            user: None,
            expires_at: None,
        },
    })
}

// ============================================================================
// Register (requires authentication)
// ============================================================================

/// POST /api/auth/register
///
/// The session is checked before the body is read, so an anonymous caller
/// always gets 401 whatever it sends.
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    body: Bytes,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let creator =
        current_session(&state.config, &headers).ok_or(AuthError::RegistrationUnauthorized)?;

    let req: RegisterRequest = parse_body(&body)?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(RegisterInput {
            name: req.name,
            username: req.username,
            password: req.password,
        })
        .await?;

    tracing::info!(created_by = creator.sub, user_id = %user.user_id, "Account created");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse::from(&user),
        }),
    ))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn current_session(
    config: &Arc<AuthConfig>,
    headers: &HeaderMap,
) -> Option<crate::domain::entity::session_claims::SessionClaims> {
    let token = config.session_cookie().extract(headers)?;
    CheckSessionUseCase::new(config.clone()).execute(&token).ok()
}

/// Parse a JSON body; an empty body counts as `{}`
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> AuthResult<T> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body).map_err(|_| AuthError::BadRequest("Malformed JSON body".into()))
}
