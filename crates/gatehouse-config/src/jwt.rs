use chrono::Duration;

use crate::{env_opt, env_or};

/// Access tokens live 15 minutes unless configured otherwise.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 15 * 60;
/// Refresh tokens live 24 hours unless configured otherwise.
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 24 * 60 * 60;
pub const DEFAULT_IDENTITY_LOOKUP_TIMEOUT_MS: u64 = 5_000;

/// Token signing configuration.
///
/// Key material is kept as the raw base64 strings from the environment; it
/// is decoded (and validated) exactly once at startup by the auth crate.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Base64 Ed25519 public key (32 bytes)
    pub public_key: String,
    /// Base64 Ed25519 private key (32-byte seed or 64-byte seed + public key)
    pub private_key: String,
    /// Access token lifetime in seconds; zero, negative or out of range means default
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds; zero, negative or out of range means default
    pub refresh_token_expiry: i64,
    /// Deadline for resolving a token subject into an identity
    pub identity_lookup_timeout_ms: u64,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            public_key: env_opt("JWT_PUBLIC_KEY").unwrap_or_default(),
            private_key: env_opt("JWT_PRIVATE_KEY").unwrap_or_default(),
            access_token_expiry: env_or("JWT_ACCESS_EXPIRY", 0),
            refresh_token_expiry: env_or("JWT_REFRESH_EXPIRY", 0),
            identity_lookup_timeout_ms: env_or(
                "IDENTITY_LOOKUP_TIMEOUT_MS",
                DEFAULT_IDENTITY_LOOKUP_TIMEOUT_MS,
            ),
        }
    }

    pub fn access_ttl(&self) -> Duration {
        ttl_or_default(self.access_token_expiry, DEFAULT_ACCESS_TOKEN_EXPIRY)
    }

    pub fn refresh_ttl(&self) -> Duration {
        ttl_or_default(self.refresh_token_expiry, DEFAULT_REFRESH_TOKEN_EXPIRY)
    }

    pub fn identity_lookup_timeout(&self) -> std::time::Duration {
        let millis = if self.identity_lookup_timeout_ms == 0 {
            DEFAULT_IDENTITY_LOOKUP_TIMEOUT_MS
        } else {
            self.identity_lookup_timeout_ms
        };
        std::time::Duration::from_millis(millis)
    }
}

/// Non-positive and out-of-range lifetimes fall back to `default`.
fn ttl_or_default(configured: i64, default: i64) -> Duration {
    let fallback = Duration::try_seconds(default).unwrap_or(Duration::zero());
    if configured > 0 {
        Duration::try_seconds(configured).unwrap_or(fallback)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(access: i64, refresh: i64) -> AuthConfig {
        AuthConfig {
            public_key: String::new(),
            private_key: String::new(),
            access_token_expiry: access,
            refresh_token_expiry: refresh,
            identity_lookup_timeout_ms: 0,
        }
    }

    #[test]
    fn test_zero_expiry_falls_back_to_defaults() {
        let cfg = config(0, 0);
        assert_eq!(cfg.access_ttl(), Duration::minutes(15));
        assert_eq!(cfg.refresh_ttl(), Duration::hours(24));
    }

    #[test]
    fn test_negative_expiry_falls_back_to_defaults() {
        let cfg = config(-5, -1);
        assert_eq!(cfg.access_ttl(), Duration::minutes(15));
        assert_eq!(cfg.refresh_ttl(), Duration::hours(24));
    }

    #[test]
    fn test_configured_expiry_is_used() {
        let cfg = config(60, 3600);
        assert_eq!(cfg.access_ttl(), Duration::seconds(60));
        assert_eq!(cfg.refresh_ttl(), Duration::seconds(3600));
    }

    #[test]
    fn test_out_of_range_expiry_falls_back_to_defaults() {
        let cfg = config(i64::MAX, i64::MAX / 2);
        assert_eq!(cfg.access_ttl(), Duration::minutes(15));
        assert_eq!(cfg.refresh_ttl(), Duration::hours(24));
    }

    #[test]
    fn test_lookup_timeout_default() {
        assert_eq!(
            config(0, 0).identity_lookup_timeout(),
            std::time::Duration::from_millis(DEFAULT_IDENTITY_LOOKUP_TIMEOUT_MS)
        );
    }
}
