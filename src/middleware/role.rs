//! Role gate for admin-only routes.
//!
//! Must sit inside [`require_auth`](crate::middleware::auth::require_auth):
//! it only reads the identity that layer attached.

use anyhow::anyhow;
use axum::{extract::Request, middleware::Next, response::Response};

use gatehouse_core::AppError;

use crate::middleware::auth::CurrentUser;

pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let CurrentUser(user) = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(|| AppError::internal(anyhow!("role gate reached without an identity")))?;

    if !user.is_admin() {
        return Err(AppError::forbidden());
    }

    Ok(next.run(req).await)
}
