//! # Gatehouse Auth
//!
//! Token handling for Gatehouse:
//!
//! - [`keys`]: Ed25519 key material decoded once at startup
//! - [`claims`]: the typed claim set carried by every token
//! - [`jwt`]: [`TokenService`], issuing and verifying EdDSA-signed tokens
//!
//! # Example
//!
//! ```ignore
//! use gatehouse_auth::{KeyMaterial, TokenKind, TokenService};
//! use gatehouse_config::AuthConfig;
//!
//! let config = AuthConfig::from_env();
//! let keys = KeyMaterial::from_config(&config)?;
//! let tokens = TokenService::new(keys, &config);
//!
//! let pair = tokens.issue_pair(&user_id.to_string())?;
//! let subject = tokens.verify(&pair.access_token, TokenKind::Access)?;
//! ```

pub mod claims;
pub mod jwt;
pub mod keys;

// Re-export commonly used types at crate root
pub use claims::{Claims, TokenKind};
pub use jwt::{TokenPair, TokenService};
pub use keys::{GeneratedKeys, KeyError, KeyMaterial};
