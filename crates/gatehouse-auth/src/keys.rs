//! Ed25519 key material.
//!
//! Keys arrive from configuration as base64:
//!
//! - public key: the raw 32-byte Ed25519 point
//! - private key: either the 32-byte seed, or 64 bytes of seed followed by
//!   the public key
//!
//! The pair is decoded and checked for consistency once, at startup. Any
//! failure here is fatal to the process.

use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use jsonwebtoken::{DecodingKey, EncodingKey};
use ring::rand::SystemRandom;
use ring::signature::{Ed25519KeyPair, KeyPair};
use thiserror::Error;

use gatehouse_config::AuthConfig;

const SEED_LEN: usize = 32;
const PUBLIC_KEY_LEN: usize = 32;

/// PKCS#8 v2 prefix for an Ed25519 private key, up to the seed.
const PKCS8_PREFIX: [u8; 16] = [
    0x30, 0x53, 0x02, 0x01, 0x01, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x04, 0x22, 0x04, 0x20,
];
/// Bytes between the seed and the embedded public key.
const PKCS8_PUBLIC_KEY_TAG: [u8; 5] = [0xa1, 0x23, 0x03, 0x21, 0x00];

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{field} is not valid base64: {source}")]
    Base64 {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error("{field} has {actual} bytes, expected {expected}")]
    InvalidLength {
        field: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("private key does not match public key")]
    Mismatch,

    #[error("failed to generate key pair")]
    Generation,
}

/// A verified Ed25519 keypair in the forms the JWT codec needs.
#[derive(Clone)]
pub struct KeyMaterial {
    pub(crate) encoding: EncodingKey,
    pub(crate) decoding: DecodingKey,
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial").finish_non_exhaustive()
    }
}

/// A freshly generated keypair, base64 encoded for configuration.
#[derive(Debug, Clone)]
pub struct GeneratedKeys {
    pub public_key: String,
    /// Seed followed by public key (64 bytes)
    pub private_key: String,
}

impl KeyMaterial {
    pub fn from_config(config: &AuthConfig) -> Result<Self, KeyError> {
        Self::from_base64(&config.public_key, &config.private_key)
    }

    pub fn from_base64(public_key: &str, private_key: &str) -> Result<Self, KeyError> {
        let public = decode("JWT_PUBLIC_KEY", public_key)?;
        let private = decode("JWT_PRIVATE_KEY", private_key)?;

        if public.len() != PUBLIC_KEY_LEN {
            return Err(KeyError::InvalidLength {
                field: "JWT_PUBLIC_KEY",
                expected: "32",
                actual: public.len(),
            });
        }

        let seed = match private.len() {
            SEED_LEN => &private[..],
            64 => {
                if private[SEED_LEN..] != public[..] {
                    return Err(KeyError::Mismatch);
                }
                &private[..SEED_LEN]
            }
            actual => {
                return Err(KeyError::InvalidLength {
                    field: "JWT_PRIVATE_KEY",
                    expected: "32 or 64",
                    actual,
                });
            }
        };

        Ed25519KeyPair::from_seed_and_public_key(seed, &public).map_err(|_| KeyError::Mismatch)?;

        let der = pkcs8_document(seed, &public);
        Ok(Self {
            encoding: EncodingKey::from_ed_der(&der),
            decoding: DecodingKey::from_ed_der(&public),
        })
    }

    /// Generates a new random keypair.
    pub fn generate() -> Result<GeneratedKeys, KeyError> {
        let rng = SystemRandom::new();
        let document = Ed25519KeyPair::generate_pkcs8(&rng).map_err(|_| KeyError::Generation)?;
        let pair =
            Ed25519KeyPair::from_pkcs8(document.as_ref()).map_err(|_| KeyError::Generation)?;

        let bytes = document.as_ref();
        let seed = &bytes[PKCS8_PREFIX.len()..PKCS8_PREFIX.len() + SEED_LEN];
        let public = pair.public_key().as_ref();

        let mut private = Vec::with_capacity(SEED_LEN + PUBLIC_KEY_LEN);
        private.extend_from_slice(seed);
        private.extend_from_slice(public);

        Ok(GeneratedKeys {
            public_key: STANDARD.encode(public),
            private_key: STANDARD.encode(private),
        })
    }
}

fn decode(field: &'static str, value: &str) -> Result<Vec<u8>, KeyError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(KeyError::Missing(field));
    }
    STANDARD
        .decode(value)
        .map_err(|source| KeyError::Base64 { field, source })
}

fn pkcs8_document(seed: &[u8], public: &[u8]) -> Vec<u8> {
    let mut der = Vec::with_capacity(
        PKCS8_PREFIX.len() + SEED_LEN + PKCS8_PUBLIC_KEY_TAG.len() + PUBLIC_KEY_LEN,
    );
    der.extend_from_slice(&PKCS8_PREFIX);
    der.extend_from_slice(seed);
    der.extend_from_slice(&PKCS8_PUBLIC_KEY_TAG);
    der.extend_from_slice(public);
    der
}
