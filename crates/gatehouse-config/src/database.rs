use crate::{env_opt, env_or};

/// Postgres settings. Without `DATABASE_URL` the server runs on an
/// in-process user store.
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env_opt("DATABASE_URL"),
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", 5),
        }
    }
}
