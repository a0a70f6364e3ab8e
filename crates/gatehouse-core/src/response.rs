//! Response formatting.
//!
//! Success payloads are returned unwrapped. Errors are rendered into a single
//! envelope shape:
//!
//! ```json
//! {"meta": {"code": 401, "message": "INVALID_TOKEN", "debug_id": "…", "reason": "…"}}
//! ```
//!
//! Internal errors always render the same public message with a fresh
//! `debug_id`; the real cause is logged under that id. User errors render
//! their own status and message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::AppError;

/// The only message an internal failure ever shows to a caller.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorMeta {
    /// HTTP status code, repeated in-band
    pub code: u16,
    pub message: String,
    /// Correlation id linking this response to server-side logs
    pub debug_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    pub meta: ErrorMeta,
}

fn envelope(status: StatusCode, message: String, debug_id: String, reason: Option<String>) -> Response {
    let body = ErrorEnvelope {
        meta: ErrorMeta {
            code: status.as_u16(),
            message,
            debug_id,
            reason,
        },
    };

    (status, Json(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let debug_id = Uuid::new_v4().to_string();

        match self {
            AppError::Internal(err) => {
                error!(
                    debug_id = %debug_id,
                    reason = %format!("{err:#}"),
                    "internal error"
                );
                envelope(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                    debug_id,
                    None,
                )
            }
            AppError::User(err) => {
                info!(
                    debug_id = %debug_id,
                    status = err.status.as_u16(),
                    kind = ?err.kind,
                    message = %err.message,
                    "request rejected"
                );
                envelope(err.status, err.message.into_owned(), debug_id, err.reason)
            }
        }
    }
}

/// A success payload with its status.
///
/// 2xx statuses and 429 ("too many requests" passthrough) are written as the
/// bare JSON payload. Any other status is treated as a caller-facing error and
/// rendered through the error envelope.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    pub status: StatusCode,
    pub body: T,
}

impl<T> Reply<T> {
    pub fn new(status: StatusCode, body: T) -> Self {
        Self { status, body }
    }

    pub fn ok(body: T) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn created(body: T) -> Self {
        Self::new(StatusCode::CREATED, body)
    }
}

impl<T> IntoResponse for Reply<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        if self.status.is_success() || self.status == StatusCode::TOO_MANY_REQUESTS {
            return (self.status, Json(self.body)).into_response();
        }

        let message = match serde_json::to_value(&self.body) {
            Ok(serde_json::Value::String(message)) => message,
            Ok(other) => other.to_string(),
            Err(err) => return AppError::internal(err).into_response(),
        };

        AppError::user(self.status, message).into_response()
    }
}
