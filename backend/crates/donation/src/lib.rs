//! Donation Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Donation entity, currency/method value objects, the shared validator, repository trait
//! - `application/` - Use cases (record, list, statistics)
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers
//!
//! ## Rules
//! - Every submission path (API, pre-check endpoint, HTML form) goes through
//!   [`domain::validation::validate_donation`]
//! - Donations are immutable once stored
//! - Currencies are tracked side by side, never converted

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::DonationConfig;
pub use domain::entities::{Donation, DonationStats, NewDonation};
pub use domain::repository::DonationRepository;
pub use domain::validation::{DonationInput, validate_donation};
pub use domain::value_objects::{Currency, PaymentMethod};
pub use error::{DonationError, DonationResult};
pub use infra::memory::InMemoryDonationRepository;
pub use infra::postgres::PgDonationRepository;
pub use presentation::router::{donation_admin_router, stats_router};
