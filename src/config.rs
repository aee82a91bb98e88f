//! Server configuration read from flags and the environment.

use crate::auth::AuthConfig;
use chrono::FixedOffset;
use clap::Parser;
use std::net::SocketAddr;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Runtime settings for the HTTP server.
///
/// Every flag can also be supplied through the environment variable named in
/// its help text. Without `--database-url` the server keeps its data in
/// memory.
#[derive(Debug, Clone, Parser)]
#[command(name = "flowment", version, about = "Task assignment and reporting API")]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "FLOWMENT_BIND", default_value = "127.0.0.1:3001")]
    pub bind: SocketAddr,

    /// `PostgreSQL` connection string.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections.
    #[arg(long, env = "FLOWMENT_POOL_SIZE", default_value_t = 10)]
    pub pool_size: u32,

    /// Secret used to sign bearer tokens.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Bearer token lifetime in days.
    #[arg(long, env = "FLOWMENT_TOKEN_TTL_DAYS", default_value_t = 7)]
    pub token_ttl_days: u64,

    /// Issuer stamped into bearer tokens.
    #[arg(long, env = "FLOWMENT_JWT_ISSUER", default_value = "flowment")]
    pub jwt_issuer: String,

    /// UTC offset at which stored due dates and times are read, as `±HH:MM`.
    #[arg(
        long,
        env = "FLOWMENT_DUE_UTC_OFFSET",
        default_value = "+00:00",
        allow_hyphen_values = true
    )]
    pub due_utc_offset: FixedOffset,
}

impl ServerConfig {
    /// Builds the token settings.
    #[must_use]
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            jwt_secret: self.jwt_secret.clone(),
            token_lifetime_secs: self.token_ttl_days.saturating_mul(SECONDS_PER_DAY),
            jwt_issuer: self.jwt_issuer.clone(),
            ..AuthConfig::default()
        }
    }
}
