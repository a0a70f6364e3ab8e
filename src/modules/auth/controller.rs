use axum::extract::State;

use gatehouse_core::{AppError, ErrorEnvelope, Reply};
use gatehouse_models::{LoginRequest, LoginResponse};

use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Login and receive an access and refresh token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed body, invalid email or wrong credentials", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tag = "Authentication"
)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Reply<LoginResponse>, AppError> {
    let response = AuthService::login(state.users.as_ref(), &state.tokens, dto).await?;
    Ok(Reply::ok(response))
}
