//! Server-rendered pages
//!
//! Public home page, login/logout, and the administrator pages. Admin
//! pages sit behind [`require_page_session`], which redirects anonymous
//! visitors to the login form.

pub mod admin;
pub mod home;
pub mod html;
pub mod login;

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::presentation::{AuthMiddlewareState, require_page_session};
use auth::{AuthConfig, SessionClaims};
use axum::http::HeaderMap;
use axum::{
    Router, middleware,
    routing::{any, get, post},
};
use donation::{DonationConfig, DonationRepository};

/// Shared state for page handlers
pub struct PagesState<U, D>
where
    U: UserRepository + Send + Sync + 'static,
    D: DonationRepository + Send + Sync + 'static,
{
    pub users: Arc<U>,
    pub donations: Arc<D>,
    pub auth: Arc<AuthConfig>,
    pub donation: Arc<DonationConfig>,
}

impl<U, D> Clone for PagesState<U, D>
where
    U: UserRepository + Send + Sync + 'static,
    D: DonationRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            donations: self.donations.clone(),
            auth: self.auth.clone(),
            donation: self.donation.clone(),
        }
    }
}

impl<U, D> PagesState<U, D>
where
    U: UserRepository + Send + Sync + 'static,
    D: DonationRepository + Send + Sync + 'static,
{
    /// Session of the current request, for pages outside the guard
    pub fn session(&self, headers: &HeaderMap) -> Option<SessionClaims> {
        AuthMiddlewareState::new(self.auth.clone()).session_of(headers)
    }
}

/// `/`, `/auth/login`, `/auth/logout`
pub fn public_pages_router<U, D>(state: PagesState<U, D>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    D: DonationRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(home::home::<U, D>))
        .route(
            "/auth/login",
            get(login::login_form::<U, D>).post(login::login_submit::<U, D>),
        )
        .route("/auth/logout", post(login::logout::<U, D>))
        .with_state(state)
}

/// `/admin/...`, guarded
///
/// The catch-all sits behind the same guard, so any `/admin` path
/// redirects anonymous visitors to the login form.
pub fn admin_pages_router<U, D>(state: PagesState<U, D>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    D: DonationRepository + Send + Sync + 'static,
{
    let guard = AuthMiddlewareState::new(state.auth.clone());

    Router::new()
        .route("/admin", get(admin::dashboard::<U, D>))
        .route("/admin/donations", get(admin::donation_list::<U, D>))
        .route(
            "/admin/donations/create",
            get(admin::create_form).post(admin::create_submit::<U, D>),
        )
        .route("/admin/{*rest}", any(admin::not_found))
        .route_layer(middleware::from_fn_with_state(guard, require_page_session))
        .with_state(state)
}
