//! Token issuance and verification.
//!
//! Every token is signed with EdDSA (Ed25519) and carries a `token_type`
//! claim. Verification pins the algorithm, checks the signature and expiry
//! with zero leeway, then requires the kind the caller asked for.
//!
//! # Example
//!
//! ```ignore
//! let tokens = TokenService::new(keys, &auth_config);
//!
//! let token = tokens.issue(&user_id, TokenKind::Access, auth_config.access_ttl())?;
//! let subject = tokens.verify(&token, TokenKind::Access)?;
//! ```

use anyhow::anyhow;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use gatehouse_config::AuthConfig;
use gatehouse_core::AppError;

use crate::claims::{Claims, DecodedClaims, TokenKind};
use crate::keys::KeyMaterial;

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and verifies tokens with a single, immutable keypair.
pub struct TokenService {
    keys: KeyMaterial,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(keys: KeyMaterial, config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.leeway = 0;

        Self {
            keys,
            validation,
            access_ttl: config.access_ttl(),
            refresh_ttl: config.refresh_ttl(),
        }
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    pub fn issue(&self, user_id: &str, kind: TokenKind, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            AppError::internal(anyhow!("{} token lifetime {} is out of range", kind, ttl))
        })?;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: kind,
        };

        encode(&Header::new(Algorithm::EdDSA), &claims, &self.keys.encoding)
            .map_err(|e| AppError::internal(anyhow!("Failed to sign {} token: {}", kind, e)))
    }

    /// Issues an access and a refresh token for the same subject.
    pub fn issue_pair(&self, user_id: &str) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue(user_id, TokenKind::Access, self.access_ttl)?,
            refresh_token: self.issue(user_id, TokenKind::Refresh, self.refresh_ttl)?,
        })
    }

    /// Verifies `token` and returns its subject.
    ///
    /// Signature, algorithm and expiry failures are `INVALID_TOKEN`. A valid
    /// token of another kind is a kind mismatch; a valid token without a
    /// subject is unauthorized.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<String, AppError> {
        let data = decode::<DecodedClaims>(token, &self.keys.decoding, &self.validation).map_err(
            |err| {
                if !matches!(err.kind(), JwtErrorKind::ExpiredSignature) {
                    warn!(error = %err, "token verification failed");
                }
                AppError::invalid_token()
            },
        )?;

        let claims = data.claims;
        if claims.token_type() != Some(expected.as_str()) {
            return Err(AppError::token_kind_mismatch());
        }

        claims
            .subject()
            .map(str::to_string)
            .ok_or_else(AppError::unauthorized)
    }
}
