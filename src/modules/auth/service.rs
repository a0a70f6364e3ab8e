use tracing::{info, instrument};

use gatehouse_auth::TokenService;
use gatehouse_core::{AppError, verify_password};
use gatehouse_db::{StoreError, UserRepository};
use gatehouse_models::{LoginRequest, LoginResponse};

use crate::metrics::track_login;

pub struct AuthService;

impl AuthService {
    /// Exchanges credentials for an access/refresh token pair.
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller.
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn login(
        users: &dyn UserRepository,
        tokens: &TokenService,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let result = Self::authenticate(users, tokens, &dto).await;
        track_login(match &result {
            Ok(_) => "success",
            Err(AppError::User(_)) => "rejected",
            Err(AppError::Internal(_)) => "error",
        });
        result
    }

    async fn authenticate(
        users: &dyn UserRepository,
        tokens: &TokenService,
        dto: &LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let record = match users.find_by_email(&dto.email).await {
            Ok(record) => record,
            Err(StoreError::NotFound) => return Err(AppError::wrong_credentials()),
            Err(err) => return Err(err.into()),
        };

        if !verify_password(&dto.password, &record.password_hash)? {
            return Err(AppError::wrong_credentials());
        }

        let pair = tokens.issue_pair(&record.id.to_string())?;
        info!(user_id = %record.id, "user logged in");

        Ok(LoginResponse {
            jwt: pair.access_token,
            refresh_token: pair.refresh_token,
            user: record.identity(),
        })
    }
}
