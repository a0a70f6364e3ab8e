use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::User;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "INVALID_EMAIL"))]
    pub email: String,
    pub password: String,
}

/// Issued on a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Access token
    pub jwt: String,
    pub refresh_token: String,
    pub user: User,
}
