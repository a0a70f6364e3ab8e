//! JWT claim structures.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a token may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims written into every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Issued-at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Unique token identifier
    pub jti: String,
    pub token_type: TokenKind,
}

/// Claims as read back during verification.
///
/// `sub` and `token_type` are kept as raw JSON so that a signed token with a
/// missing or non-string field still decodes; the verifier then reports it as
/// a kind mismatch or an unauthorized subject instead of a malformed token.
#[derive(Debug, Deserialize)]
pub(crate) struct DecodedClaims {
    #[serde(default)]
    sub: Option<Value>,
    #[serde(default)]
    token_type: Option<Value>,
}

impl DecodedClaims {
    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_ref().and_then(Value::as_str)
    }

    /// The subject, when it is a non-empty string.
    pub fn subject(&self) -> Option<&str> {
        self.sub
            .as_ref()
            .and_then(Value::as_str)
            .filter(|sub| !sub.is_empty())
    }
}
