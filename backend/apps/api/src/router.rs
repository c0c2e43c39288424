//! Router assembly

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::presentation::{AuthMiddlewareState, require_api_session};
use auth::{AuthConfig, auth_router};
use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware, routing::get};
use donation::{DonationConfig, DonationRepository, donation_admin_router, stats_router};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

use crate::pages::{PagesState, admin_pages_router, public_pages_router};

/// Everything the routes need
pub struct AppState<U, D> {
    pub users: Arc<U>,
    pub donations: Arc<D>,
    pub auth: Arc<AuthConfig>,
    pub donation: Arc<DonationConfig>,
}

/// Build the full application router (without transport layers)
pub fn build_router<U, D>(state: AppState<U, D>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    D: DonationRepository + Send + Sync + 'static,
{
    let guard = AuthMiddlewareState::new(state.auth.clone());

    let admin_api = donation_admin_router(state.donations.clone(), state.donation.clone())
        .layer(middleware::from_fn_with_state(guard, require_api_session));

    let pages = PagesState {
        users: state.users.clone(),
        donations: state.donations.clone(),
        auth: state.auth.clone(),
        donation: state.donation.clone(),
    };

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_router(state.users, state.auth))
        .nest("/api/admin/donations", admin_api)
        .nest(
            "/api/stats",
            stats_router(state.donations, state.donation),
        )
        .merge(public_pages_router(pages.clone()))
        .merge(admin_pages_router(pages))
}

/// CORS for the configured frontend origins (cookies allowed)
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

async fn health() -> &'static str {
    "ok"
}
