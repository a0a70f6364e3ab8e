use axum::extract::{Path, State};

use gatehouse_core::{AppError, ErrorEnvelope, Reply};
use gatehouse_models::{CreateUserRequest, CreatedUser, UpdateUserRequest, User};

use super::service::UserService;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Get the authenticated user's identity
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Reply<User> {
    Reply::ok(user)
}

/// Create a user (admin only)
#[utoipa::path(
    post,
    path = "/user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = CreatedUser),
        (status = 400, description = "Malformed body, invalid email or weak password", body = ErrorEnvelope),
        (status = 401, description = "Unauthenticated", body = ErrorEnvelope),
        (status = 403, description = "Caller is not an admin", body = ErrorEnvelope),
        (status = 409, description = "Email already in use", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserRequest>,
) -> Result<Reply<CreatedUser>, AppError> {
    let created = UserService::create_user(state.users.as_ref(), dto).await?;
    Ok(Reply::created(created))
}

/// Get a user by id (admin only)
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Malformed user id", body = ErrorEnvelope),
        (status = 401, description = "Unauthenticated", body = ErrorEnvelope),
        (status = 403, description = "Caller is not an admin", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Reply<User>, AppError> {
    let user = UserService::get_user(state.users.as_ref(), &id).await?;
    Ok(Reply::ok(user))
}

/// Update a user's name or email (admin only)
#[utoipa::path(
    put,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Malformed body or user id", body = ErrorEnvelope),
        (status = 401, description = "Unauthenticated", body = ErrorEnvelope),
        (status = 403, description = "Caller is not an admin", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope),
        (status = 409, description = "Email already in use", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateUserRequest>,
) -> Result<Reply<User>, AppError> {
    let user = UserService::update_user(state.users.as_ref(), &id, dto).await?;
    Ok(Reply::ok(user))
}
