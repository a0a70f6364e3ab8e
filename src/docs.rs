use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use gatehouse_core::{ErrorEnvelope, ErrorMeta};
use gatehouse_models::{
    CreateUserRequest, CreatedUser, LoginRequest, LoginResponse, Role, UpdateUserRequest, User,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
    ),
    components(
        schemas(
            User,
            Role,
            LoginRequest,
            LoginResponse,
            CreateUserRequest,
            CreatedUser,
            UpdateUserRequest,
            ErrorEnvelope,
            ErrorMeta,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Credential login and token issuance"),
        (name = "Users", description = "Identity and user management")
    ),
    info(
        title = "Gatehouse API",
        version = "0.1.0",
        description = "Token-authenticated HTTP API with EdDSA-signed JWTs and role-gated user management.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
