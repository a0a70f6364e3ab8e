use std::sync::Arc;
use std::time::Duration;

use gatehouse_auth::TokenService;
use gatehouse_db::UserRepository;

/// Shared, read-only application state handed to every handler and
/// middleware.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<TokenService>,
    /// Deadline for resolving a token subject into an identity
    pub lookup_timeout: Duration,
    /// Service name stamped on request logs
    pub facility: Arc<str>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: TokenService,
        lookup_timeout: Duration,
        facility: &str,
    ) -> Self {
        Self {
            users,
            tokens: Arc::new(tokens),
            lookup_timeout,
            facility: Arc::from(facility),
        }
    }
}
