//! Relief donation tracker: HTTP application
//!
//! Wires the `auth` and `donation` crates into one router, serves the
//! server-rendered pages, and reads configuration from the environment.
//! The binary (`main.rs`) adds the database pool, migrations and
//! transport layers.

pub mod config;
pub mod pages;
pub mod router;
pub mod seed;

pub use config::{AdminSeed, AppConfig};
pub use router::{AppState, build_router, cors_layer};
pub use seed::seed_admin;
