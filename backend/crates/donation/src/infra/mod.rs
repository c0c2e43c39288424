//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryDonationRepository;
pub use postgres::PgDonationRepository;
