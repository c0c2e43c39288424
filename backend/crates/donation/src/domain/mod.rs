//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Donation, NewDonation, DonationPage, DonationStats)
//! - Domain value objects (Currency, PaymentMethod, PageRequest)
//! - The donation validator shared by every submission path
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod validation;
pub mod value_objects;
