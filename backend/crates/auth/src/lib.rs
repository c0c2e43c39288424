//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases (sign in, register, session check)
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, access guard
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Stateless HMAC-signed session tokens in an HttpOnly cookie
//! - Unknown user and wrong password are indistinguishable (same error,
//!   same Argon2 cost)
//! - Any valid session is full administrator access (no roles)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::entity::session_claims::SessionClaims;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryUserRepository, PgUserRepository};
pub use presentation::router::auth_router;
