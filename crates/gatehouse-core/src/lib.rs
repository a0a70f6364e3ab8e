//! # Gatehouse Core
//!
//! Foundational types shared by every Gatehouse crate:
//!
//! - [`errors`]: the classified error type ([`AppError`]) threaded through every call boundary
//! - [`response`]: the response formatter turning payloads and errors into HTTP responses
//! - [`password`]: bcrypt password hashing and verification
//! - [`validation`]: password policy checks
//!
//! # Example
//!
//! ```ignore
//! use gatehouse_core::{AppError, Reply};
//!
//! async fn handler() -> Result<Reply<String>, AppError> {
//!     Err(AppError::forbidden())
//! }
//! ```

pub mod errors;
pub mod password;
pub mod response;
pub mod validation;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorCategory, ErrorKind, UserError};
pub use password::{hash_password, verify_password};
pub use response::{ErrorEnvelope, ErrorMeta, INTERNAL_ERROR_MESSAGE, Reply};
