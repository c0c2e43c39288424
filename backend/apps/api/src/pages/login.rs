//! Login and logout pages

use axum::Form;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use auth::AuthError;
use auth::application::{SignInInput, SignInUseCase};
use auth::domain::repository::UserRepository;
use auth::presentation::safe_redirect_target;
use donation::DonationRepository;

use super::PagesState;
use super::html::{banner, escape, layout};

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub redirect_to: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub redirect_to: Option<String>,
}

/// GET /auth/login
///
/// Already signed in visitors go straight to their target.
pub async fn login_form<U, D>(
    State(state): State<PagesState<U, D>>,
    headers: HeaderMap,
    Query(query): Query<LoginQuery>,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    D: DonationRepository + Send + Sync + 'static,
{
    if state.session(&headers).is_some() {
        return Redirect::to(safe_redirect_target(query.redirect_to.as_deref())).into_response();
    }

    render_form(query.redirect_to.as_deref(), "", None).into_response()
}

/// POST /auth/login
pub async fn login_submit<U, D>(
    State(state): State<PagesState<U, D>>,
    Form(form): Form<LoginForm>,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    D: DonationRepository + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.users.clone(), state.auth.clone());

    let result = use_case
        .execute(SignInInput {
            username: form.username.clone(),
            password: form.password,
        })
        .await;

    match result {
        Ok(output) => {
            let cookie = state
                .auth
                .session_cookie()
                .set_cookie_header(&output.session_token);
            let target = safe_redirect_target(form.redirect_to.as_deref());

            tracing::info!(user_id = output.claims.sub, "Signed in via login form");

            ([(header::SET_COOKIE, cookie)], Redirect::to(target)).into_response()
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Invalid login attempt");
            (
                StatusCode::UNAUTHORIZED,
                render_form(
                    form.redirect_to.as_deref(),
                    &form.username,
                    Some("Invalid username or password"),
                ),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Sign in failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                render_form(
                    form.redirect_to.as_deref(),
                    &form.username,
                    Some("Something went wrong. Please try again."),
                ),
            )
                .into_response()
        }
    }
}

/// POST /auth/logout
pub async fn logout<U, D>(State(state): State<PagesState<U, D>>) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    D: DonationRepository + Send + Sync + 'static,
{
    let cookie = state.auth.session_cookie().delete_cookie_header();

    ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}

fn render_form(
    redirect_to: Option<&str>,
    username: &str,
    error: Option<&str>,
) -> axum::response::Html<String> {
    let hidden = redirect_to
        .map(|target| {
            format!(
                r#"<input type="hidden" name="redirect_to" value="{}">"#,
                escape(target)
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"{}<form method="post" action="/auth/login">
{hidden}
<label>Username <input name="username" value="{}" autocomplete="username" required></label>
<label>Password <input type="password" name="password" autocomplete="current-password" required></label>
<button type="submit">Sign in</button>
</form>"#,
        error.map(|message| banner("error", message)).unwrap_or_default(),
        escape(username),
    );

    layout("Admin login", None, &body)
}
