//! # Gatehouse Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: signing key material and token lifetimes
//! - [`server`]: bind address, facility name, shutdown grace period
//! - [`admin`]: bootstrap administrator credentials
//! - [`database`]: optional Postgres connection settings
//!
//! # Example
//!
//! ```ignore
//! use gatehouse_config::{AuthConfig, ServerConfig};
//!
//! dotenvy::dotenv().ok();
//! let auth_config = AuthConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod admin;
pub mod database;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use admin::AdminConfig;
pub use database::DatabaseConfig;
pub use jwt::AuthConfig;
pub use server::ServerConfig;

/// Reads and parses an environment variable, falling back to `default` when
/// it is unset or unparsable.
pub(crate) fn env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads an environment variable, treating blank values as unset.
pub(crate) fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
