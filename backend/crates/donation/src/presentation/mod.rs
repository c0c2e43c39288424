//! Presentation Layer - HTTP handlers and routing

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::DonationAppState;
pub use router::{donation_admin_router, stats_router};
