//! # Gatehouse
//!
//! A small token-authenticated HTTP API built with Axum.
//!
//! Clients log in with an email and password and receive an EdDSA-signed
//! access token plus a refresh token. Protected routes verify the access
//! token, resolve the caller's identity from the user store and, for user
//! management, require the admin role.
//!
//! ## Request pipeline
//!
//! ```text
//! request logging
//!   └─ panic containment            (middleware::recovery)
//!        └─ JWT verification        (middleware::auth::require_auth)
//!             └─ admin gate         (middleware::role::require_admin)
//!                  └─ handler
//! ```
//!
//! Every failure is an [`AppError`](gatehouse_core::AppError). Caller-facing
//! errors are rendered with their own status and message; internal errors
//! render as a generic 500 with a `debug_id` that links to the server log.
//!
//! ## Modules
//!
//! - [`docs`]: OpenAPI document
//! - [`logging`]: tracing setup and request logging
//! - [`metrics`]: Prometheus request and login metrics
//! - [`middleware`]: panic containment, authentication and role gate
//! - [`modules`]: feature modules (auth, users)
//! - [`router`]: main application router
//! - [`state`]: shared application state
//! - [`validator`]: validated JSON extractor

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use gatehouse_auth;
pub use gatehouse_config;
pub use gatehouse_core;
pub use gatehouse_db;
pub use gatehouse_models;
