//! Donation Routers

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::DonationConfig;
use crate::domain::repository::DonationRepository;
use crate::presentation::handlers::{self, DonationAppState};

/// Admin donation API (mounted under `/api/admin/donations`)
///
/// Carries no guard of its own; the caller layers the session check on top.
pub fn donation_admin_router<R>(repo: Arc<R>, config: Arc<DonationConfig>) -> Router
where
    R: DonationRepository + Send + Sync + 'static,
{
    let state = DonationAppState { repo, config };

    Router::new()
        .route(
            "/",
            post(handlers::create_donation::<R>).get(handlers::list_donations::<R>),
        )
        .route("/validate", post(handlers::validate_donation::<R>))
        .route("/{id}", get(handlers::get_donation::<R>))
        .with_state(state)
}

/// Public statistics (mounted at `/api/stats`)
pub fn stats_router<R>(repo: Arc<R>, config: Arc<DonationConfig>) -> Router
where
    R: DonationRepository + Send + Sync + 'static,
{
    let state = DonationAppState { repo, config };

    Router::new()
        .route("/", get(handlers::stats::<R>))
        .with_state(state)
}
