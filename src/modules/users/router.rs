use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::users::controller::{create_user, get_me, get_user, update_user};
use crate::state::AppState;

/// Routes any authenticated user may call.
pub fn init_profile_router() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

/// Admin-only user management routes.
pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/user", post(create_user))
        .route("/user/{id}", get(get_user).put(update_user))
}
