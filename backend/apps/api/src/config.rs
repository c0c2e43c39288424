//! Application Configuration
//!
//! Everything is read from the environment (`.env` is loaded first by the
//! binary). Parsing goes through a lookup function so it can be tested
//! without touching the process environment.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use axum::http::HeaderValue;
use base64::Engine;
use base64::engine::general_purpose;
use donation::DonationConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";

/// Bootstrap administrator created at startup when missing
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
    pub name: Option<String>,
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub donation: DonationConfig,
    pub admin_seed: Option<AdminSeed>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid DATABASE_MAX_CONNECTIONS: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("Invalid BIND_ADDR")?;

        let frontend_origins = parse_origins(
            &var("FRONTEND_ORIGINS").unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string()),
        )?;

        let auth = auth_config(&var)?;

        let donation = DonationConfig {
            stats_utc_offset_minutes: match var("STATS_UTC_OFFSET_MINUTES") {
                Some(raw) => parse_utc_offset(&raw)?,
                None => 0,
            },
            ..DonationConfig::default()
        };

        let admin_seed = match (var("ADMIN_USERNAME"), var("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(AdminSeed {
                username,
                password,
                name: var("ADMIN_NAME"),
            }),
            _ => None,
        };

        Ok(Self {
            database_url,
            database_max_connections,
            bind_addr,
            frontend_origins,
            auth,
            donation,
            admin_seed,
        })
    }
}

fn auth_config(var: &impl Fn(&str) -> Option<String>) -> anyhow::Result<AuthConfig> {
    let mut config = match var("SESSION_SECRET") {
        Some(secret_b64) => AuthConfig {
            session_secret: decode_secret(&secret_b64)?,
            ..AuthConfig::default()
        },
        None if cfg!(debug_assertions) => {
            tracing::warn!("SESSION_SECRET not set, using a random secret (sessions end on restart)");
            AuthConfig::with_random_secret()
        }
        None => bail!("SESSION_SECRET must be set in production"),
    };

    if let Some(raw) = var("SESSION_TTL_SECS") {
        let secs: u64 = raw
            .parse()
            .with_context(|| format!("Invalid SESSION_TTL_SECS: {raw}"))?;
        config.session_ttl = Duration::from_secs(secs);
    }

    config.cookie_secure = match var("COOKIE_SECURE") {
        Some(raw) => parse_bool(&raw).with_context(|| format!("Invalid COOKIE_SECURE: {raw}"))?,
        None => !cfg!(debug_assertions),
    };

    Ok(config)
}

fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(secret_b64)
        .context("SESSION_SECRET must be base64")?;

    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes, got {}", bytes.len()))
}

/// Comma-separated exact origins
///
/// Credentialed CORS cannot use a wildcard origin, so `*` is refused.
fn parse_origins(raw: &str) -> anyhow::Result<Vec<String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if origin.contains('*') {
                bail!("FRONTEND_ORIGINS cannot contain a wildcard: {origin}");
            }
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid FRONTEND_ORIGINS entry: {origin}"))?;
            Ok(origin.to_string())
        })
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Real-world offsets stay within -12:00..=+14:00
fn parse_utc_offset(raw: &str) -> anyhow::Result<i32> {
    let minutes: i32 = raw
        .parse()
        .with_context(|| format!("Invalid STATS_UTC_OFFSET_MINUTES: {raw}"))?;
    if !(-12 * 60..=14 * 60).contains(&minutes) {
        bail!("STATS_UTC_OFFSET_MINUTES out of range: {minutes}");
    }
    Ok(minutes)
}
