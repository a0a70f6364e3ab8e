//! # Gatehouse DB
//!
//! The user store behind authentication and user management.
//!
//! [`UserRepository`] is the only seam the rest of the application sees.
//! Two backends implement it:
//!
//! - [`PgUserRepository`]: Postgres via SQLx, with embedded migrations
//! - [`MemoryUserRepository`]: an in-process map, used when no database is
//!   configured and throughout the tests
//!
//! # Example
//!
//! ```ignore
//! use gatehouse_db::{PgUserRepository, UserRepository};
//!
//! let pool = gatehouse_db::init_db_pool(&url, 5).await?;
//! let users = PgUserRepository::new(pool);
//! users.migrate().await?;
//! let admin_exists = users.admin_exists().await?;
//! ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use gatehouse_core::AppError;
use gatehouse_models::{NewUser, User, UserChanges, UserRecord};

pub use memory::MemoryUserRepository;
pub use postgres::{PgUserRepository, init_db_pool};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,

    #[error("email already in use")]
    Duplicate,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Default mapping of store failures onto the error taxonomy. Call sites
/// that need a different meaning for `NotFound` (login, token subjects)
/// match on [`StoreError`] themselves.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::user_not_found(),
            StoreError::Duplicate => AppError::email_already_exists(),
            StoreError::Database(e) => AppError::internal(e),
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<User, StoreError>;

    /// Looks a user up by email, including the password hash.
    async fn find_by_email(&self, email: &str) -> Result<UserRecord, StoreError>;

    /// Inserts a user and returns its new id. Fails with `Duplicate` when the
    /// email is taken.
    async fn create(&self, user: NewUser) -> Result<Uuid, StoreError>;

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<(), StoreError>;

    async fn admin_exists(&self) -> Result<bool, StoreError>;
}
