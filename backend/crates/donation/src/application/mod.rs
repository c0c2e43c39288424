//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod donation_stats;
pub mod list_donations;
pub mod record_donation;

// Re-exports
pub use config::DonationConfig;
pub use donation_stats::{DonationStatsUseCase, start_of_day};
pub use list_donations::ListDonationsUseCase;
pub use record_donation::RecordDonationUseCase;
