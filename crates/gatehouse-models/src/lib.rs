//! # Gatehouse Models
//!
//! Domain models and DTOs shared by the store, the services and the HTTP
//! layer.
//!
//! - [`users`]: identities, stored users and user management requests
//! - [`auth`]: login request and response

pub mod auth;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{LoginRequest, LoginResponse};
pub use users::{
    CreateUserRequest, CreatedUser, NewUser, Role, UpdateUserRequest, User, UserChanges,
    UserRecord,
};
