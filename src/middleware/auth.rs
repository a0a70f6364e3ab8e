//! JWT verification and identity attachment.

use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tokio::time::timeout;
use uuid::Uuid;

use gatehouse_auth::TokenKind;
use gatehouse_core::AppError;
use gatehouse_db::StoreError;
use gatehouse_models::User;

use crate::state::AppState;

/// The identity resolved by [`require_auth`] for the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::internal(anyhow!("no authenticated identity on request")))
    }
}

/// Pulls the raw token out of `Authorization: Bearer <token>`.
///
/// `Basic <token>` is accepted the same way; the value is not decoded as
/// Basic credentials. Scheme matching is case-insensitive.
pub fn extract_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(AppError::unauthorized)?;

    let (scheme, token) = value.trim().split_once(' ').ok_or_else(AppError::unauthorized)?;
    if !scheme.eq_ignore_ascii_case("bearer") && !scheme.eq_ignore_ascii_case("basic") {
        return Err(AppError::unauthorized());
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::unauthorized());
    }
    Ok(token)
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers())?;
    let subject = state.tokens.verify(token, TokenKind::Access)?;
    let user_id = Uuid::parse_str(&subject).map_err(|_| AppError::unauthorized())?;

    let user = match timeout(state.lookup_timeout, state.users.find_by_id(user_id)).await {
        Ok(Ok(user)) => user,
        Ok(Err(StoreError::NotFound)) => return Err(AppError::unauthorized()),
        Ok(Err(err)) => {
            return Err(AppError::internal(
                anyhow::Error::new(err).context("identity lookup failed"),
            ));
        }
        Err(_) => {
            return Err(AppError::internal(anyhow!(
                "identity lookup timed out after {:?}",
                state.lookup_timeout
            )));
        }
    };

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_and_basic_carriers() {
        assert_eq!(extract_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(extract_token(&headers("BEARER abc")).unwrap(), "abc");
        assert_eq!(extract_token(&headers("bearer abc")).unwrap(), "abc");
        assert_eq!(extract_token(&headers("Basic abc")).unwrap(), "abc");
        assert_eq!(extract_token(&headers("BASIC abc")).unwrap(), "abc");
    }

    #[test]
    fn test_rejected_headers() {
        assert!(extract_token(&HeaderMap::new()).is_err());
        for value in ["", "Bearer", "Bearer ", "Token abc", "abc.def.ghi", "Digest abc"] {
            let err = extract_token(&headers(value)).unwrap_err();
            assert_eq!(err.to_string(), "unauthorized", "header {value:?}");
        }
    }
}
