use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use gatehouse::router::{build_router, init_router};
use gatehouse::state::AppState;
use gatehouse_auth::{KeyMaterial, TokenService};
use gatehouse_config::AuthConfig;
use gatehouse_core::hash_password;
use gatehouse_db::{MemoryUserRepository, UserRepository};
use gatehouse_models::{NewUser, Role};
use http_body_util::BodyExt;
use uuid::Uuid;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "Adm1n!secret";
pub const USER_EMAIL: &str = "user@example.com";
pub const USER_PASSWORD: &str = "Us3r!secret";

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub state: AppState,
    pub repository: Arc<MemoryUserRepository>,
    pub admin: TestUser,
    pub user: TestUser,
}

impl TestApp {
    #[allow(dead_code)]
    pub fn router(&self) -> Router {
        init_router(self.state.clone())
    }

    /// Router with `extra` mounted behind authentication and the admin gate.
    #[allow(dead_code)]
    pub fn router_with(&self, extra: Router<AppState>) -> Router {
        build_router(self.state.clone(), extra)
    }

    #[allow(dead_code)]
    pub fn access_token(&self, user: &TestUser) -> String {
        self.state
            .tokens
            .issue_pair(&user.id.to_string())
            .unwrap()
            .access_token
    }

    #[allow(dead_code)]
    pub fn refresh_token(&self, user: &TestUser) -> String {
        self.state
            .tokens
            .issue_pair(&user.id.to_string())
            .unwrap()
            .refresh_token
    }
}

/// Auth config carrying a freshly generated keypair.
pub fn test_auth_config() -> AuthConfig {
    let keys = KeyMaterial::generate().unwrap();
    AuthConfig {
        public_key: keys.public_key,
        private_key: keys.private_key,
        access_token_expiry: 0,
        refresh_token_expiry: 0,
        identity_lookup_timeout_ms: 1_000,
    }
}

pub fn test_token_service() -> TokenService {
    let config = test_auth_config();
    TokenService::new(KeyMaterial::from_config(&config).unwrap(), &config)
}

pub async fn create_test_user(
    repository: &dyn UserRepository,
    email: &str,
    password: &str,
    role: Role,
) -> TestUser {
    let id = repository
        .create(NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            role,
        })
        .await
        .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

/// State over an arbitrary repository, with its own keys.
#[allow(dead_code)]
pub fn state_with(repository: Arc<dyn UserRepository>, lookup_timeout: Duration) -> AppState {
    AppState::new(repository, test_token_service(), lookup_timeout, "gatehouse-test")
}

pub async fn setup_test_app() -> TestApp {
    let repository = Arc::new(MemoryUserRepository::new());
    let admin = create_test_user(repository.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD, Role::Admin).await;
    let user = create_test_user(repository.as_ref(), USER_EMAIL, USER_PASSWORD, Role::User).await;

    let state = state_with(repository.clone(), Duration::from_secs(1));

    TestApp {
        state,
        repository,
        admin,
        user,
    }
}

#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    authorization: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[allow(dead_code)]
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
