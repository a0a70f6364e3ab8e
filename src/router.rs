use axum::{Router, middleware, routing::get};

use crate::docs::openapi_json;
use crate::logging::logging_middleware;
use crate::middleware::auth::require_auth;
use crate::middleware::recovery::catch_panic_layer;
use crate::middleware::role::require_admin;
use crate::modules::auth::router::init_auth_router;
use crate::modules::users::router::{init_profile_router, init_users_router};
use crate::state::AppState;

/// Builds the application router.
///
/// Layer order, outermost first: request logging, panic containment, then
/// per route JWT verification and the admin gate.
pub fn init_router(state: AppState) -> Router {
    build_router(state, Router::new())
}

/// Like [`init_router`], with `extra` merged in behind JWT verification and
/// the admin gate. Used to mount additional admin-only routes.
pub fn build_router(state: AppState, extra: Router<AppState>) -> Router {
    let authenticated = init_profile_router()
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let admin = init_users_router()
        .merge(extra)
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/auth", init_auth_router())
        .merge(authenticated)
        .merge(admin)
        .with_state(state.clone())
        .layer(catch_panic_layer())
        .layer(middleware::from_fn_with_state(state, logging_middleware))
}
