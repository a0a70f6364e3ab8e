//! Classified application errors.
//!
//! Every failable operation returns either a value or an [`AppError`]. The
//! error is a two-variant sum type:
//!
//! - [`AppError::Internal`]: an operator-facing failure. Its message is logged
//!   server-side and never shown to the caller.
//! - [`AppError::User`]: a caller-facing failure with an HTTP status and a
//!   stable, machine-checkable message.
//!
//! The variant is only inspected by the response formatter
//! (`IntoResponse for AppError`); everything in between propagates the error
//! unchanged with `?`.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;

/// Whether an error is the caller's fault or ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Internal,
    User,
}

/// Stable classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Body could not be parsed as the expected JSON document.
    InvalidRequestBody,
    /// Body parsed but a field has the wrong shape (bad email, weak password, malformed id).
    ValidationFailure,
    WrongCredentials,
    /// Bad signature, unexpected algorithm, expired or malformed token.
    InvalidToken,
    /// Token verified but was issued for another purpose (refresh used as access, ...).
    TokenKindMismatch,
    /// Missing credentials or a subject that cannot be resolved.
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    TooManyRequests,
    /// Any other caller-facing rejection built from a raw status.
    Rejected,
    Internal,
}

impl ErrorKind {
    fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            429 => ErrorKind::TooManyRequests,
            _ => ErrorKind::Rejected,
        }
    }
}

/// A caller-facing failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserError {
    pub kind: ErrorKind,
    pub status: StatusCode,
    pub message: Cow<'static, str>,
    /// Optional detail rendered as `meta.reason`.
    pub reason: Option<String>,
}

#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
    User(UserError),
}

impl AppError {
    /// Operator-facing failure, rendered as a generic 500.
    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        AppError::Internal(err.into())
    }

    /// Caller-facing failure with an arbitrary status and message.
    pub fn user(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        AppError::User(UserError {
            kind: ErrorKind::from_status(status),
            status,
            message: message.into(),
            reason: None,
        })
    }

    fn of(kind: ErrorKind, status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        AppError::User(UserError {
            kind,
            status,
            message: message.into(),
            reason: None,
        })
    }

    pub fn invalid_request_body() -> Self {
        Self::of(
            ErrorKind::InvalidRequestBody,
            StatusCode::BAD_REQUEST,
            "INVALID_REQUEST_BODY",
        )
    }

    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::of(ErrorKind::ValidationFailure, StatusCode::BAD_REQUEST, message)
    }

    pub fn invalid_email() -> Self {
        Self::validation("INVALID_EMAIL")
    }

    pub fn wrong_user_id() -> Self {
        Self::validation("WRONG_USER_ID")
    }

    pub fn wrong_credentials() -> Self {
        Self::of(
            ErrorKind::WrongCredentials,
            StatusCode::BAD_REQUEST,
            "WRONG_CREDENTIALS",
        )
    }

    pub fn invalid_token() -> Self {
        Self::of(
            ErrorKind::InvalidToken,
            StatusCode::UNAUTHORIZED,
            "INVALID_TOKEN",
        )
    }

    pub fn token_kind_mismatch() -> Self {
        Self::of(
            ErrorKind::TokenKindMismatch,
            StatusCode::UNAUTHORIZED,
            "unauthorized",
        )
    }

    pub fn unauthorized() -> Self {
        Self::of(
            ErrorKind::Unauthorized,
            StatusCode::UNAUTHORIZED,
            "unauthorized",
        )
    }

    pub fn forbidden() -> Self {
        Self::of(
            ErrorKind::Forbidden,
            StatusCode::FORBIDDEN,
            "ACTION_FORBIDDEN",
        )
    }

    pub fn user_not_found() -> Self {
        Self::of(ErrorKind::NotFound, StatusCode::NOT_FOUND, "USER_NOT_FOUND")
    }

    pub fn email_already_exists() -> Self {
        Self::of(
            ErrorKind::Conflict,
            StatusCode::CONFLICT,
            "EMAIL_ALREADY_EXISTS",
        )
    }

    pub fn too_many_requests() -> Self {
        Self::of(
            ErrorKind::TooManyRequests,
            StatusCode::TOO_MANY_REQUESTS,
            "too many requests",
        )
    }

    /// Attaches a detail shown to the caller as `meta.reason`. Internal errors ignore it.
    pub fn with_reason(self, reason: impl Into<String>) -> Self {
        match self {
            AppError::User(mut err) => {
                err.reason = Some(reason.into());
                AppError::User(err)
            }
            internal => internal,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Internal(_) => ErrorCategory::Internal,
            AppError::User(_) => ErrorCategory::User,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Internal(_) => ErrorKind::Internal,
            AppError::User(err) => err.kind,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::User(err) => err.status,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(err) => write!(f, "{err:#}"),
            AppError::User(err) => f.write_str(&err.message),
        }
    }
}
