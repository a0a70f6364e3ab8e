use tracing::{info, instrument};
use uuid::Uuid;

use gatehouse_config::AdminConfig;
use gatehouse_core::validation::check_password_policy;
use gatehouse_core::{AppError, hash_password};
use gatehouse_db::UserRepository;
use gatehouse_models::{
    CreateUserRequest, CreatedUser, NewUser, Role, UpdateUserRequest, User, UserChanges,
};

pub struct UserService;

fn parse_user_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::wrong_user_id())
}

impl UserService {
    #[instrument(skip(users))]
    pub async fn get_user(users: &dyn UserRepository, id: &str) -> Result<User, AppError> {
        let id = parse_user_id(id)?;
        Ok(users.find_by_id(id).await?)
    }

    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn create_user(
        users: &dyn UserRepository,
        dto: CreateUserRequest,
    ) -> Result<CreatedUser, AppError> {
        check_password_policy(&dto.password)?;

        let id = users
            .create(NewUser {
                name: dto.name,
                email: dto.email,
                password_hash: hash_password(&dto.password)?,
                role: Role::User,
            })
            .await?;

        info!(user_id = %id, "user created");
        Ok(CreatedUser { id })
    }

    #[instrument(skip(users, dto))]
    pub async fn update_user(
        users: &dyn UserRepository,
        id: &str,
        dto: UpdateUserRequest,
    ) -> Result<User, AppError> {
        let id = parse_user_id(id)?;
        let changes = UserChanges::from(dto);

        if !changes.is_empty() {
            users.update(id, changes).await?;
        }

        Ok(users.find_by_id(id).await?)
    }

    /// Creates the configured administrator unless an admin already exists.
    ///
    /// Returns the new admin's id, or `None` when nothing was created.
    pub async fn init_admin(
        users: &dyn UserRepository,
        config: &AdminConfig,
    ) -> Result<Option<Uuid>, AppError> {
        let Some((name, email, password)) = config.credentials() else {
            info!("admin bootstrap not configured, skipping");
            return Ok(None);
        };

        if users.admin_exists().await? {
            info!("admin already exists, skipping bootstrap");
            return Ok(None);
        }

        check_password_policy(password)?;

        let id = users
            .create(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: hash_password(password)?,
                role: Role::Admin,
            })
            .await?;

        info!(user_id = %id, email = %email, "admin account created");
        Ok(Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::{ErrorKind, verify_password};
    use gatehouse_db::MemoryUserRepository;

    fn admin_config() -> AdminConfig {
        AdminConfig {
            name: Some("Root".into()),
            email: Some("root@example.com".into()),
            password: Some("Adm1n!pass".into()),
        }
    }

    fn create_request(email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: "Ada".into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_init_admin_once() {
        let repo = MemoryUserRepository::new();

        let created = UserService::init_admin(&repo, &admin_config()).await.unwrap();
        assert!(created.is_some());

        let again = UserService::init_admin(&repo, &admin_config()).await.unwrap();
        assert!(again.is_none());

        let record = repo.find_by_email("root@example.com").await.unwrap();
        assert_eq!(record.role, Role::Admin);
        assert!(verify_password("Adm1n!pass", &record.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_init_admin_unconfigured() {
        let repo = MemoryUserRepository::new();
        let created = UserService::init_admin(&repo, &AdminConfig::default()).await.unwrap();

        assert!(created.is_none());
        assert!(!repo.admin_exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_init_admin_weak_password_fails() {
        let repo = MemoryUserRepository::new();
        let config = AdminConfig {
            password: Some("weak".into()),
            ..admin_config()
        };

        let err = UserService::init_admin(&repo, &config).await.unwrap_err();
        assert_eq!(err.to_string(), "INVALID_LENGTH");
    }

    #[tokio::test]
    async fn test_create_user_hashes_and_defaults_role() {
        let repo = MemoryUserRepository::new();
        let created = UserService::create_user(&repo, create_request("ada@example.com", "Lovelace1!"))
            .await
            .unwrap();

        let record = repo.find_by_email("ada@example.com").await.unwrap();
        assert_eq!(record.id, created.id);
        assert_eq!(record.role, Role::User);
        assert_ne!(record.password_hash, "Lovelace1!");
    }

    #[tokio::test]
    async fn test_create_user_rejections() {
        let repo = MemoryUserRepository::new();
        UserService::create_user(&repo, create_request("ada@example.com", "Lovelace1!"))
            .await
            .unwrap();

        let err = UserService::create_user(&repo, create_request("ada@example.com", "Lovelace1!"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.to_string(), "EMAIL_ALREADY_EXISTS");

        let err = UserService::create_user(&repo, create_request("bob@example.com", "lovelace1!"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "UPPERCASE_REQUIRED");
    }

    #[tokio::test]
    async fn test_get_and_update_user() {
        let repo = MemoryUserRepository::new();
        let created = UserService::create_user(&repo, create_request("ada@example.com", "Lovelace1!"))
            .await
            .unwrap();
        let id = created.id.to_string();

        let user = UserService::get_user(&repo, &id).await.unwrap();
        assert_eq!(user.name, "Ada");

        let updated = UserService::update_user(
            &repo,
            &id,
            UpdateUserRequest {
                name: Some("Augusta".into()),
                email: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Augusta");
        assert_eq!(updated.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_bad_and_unknown_ids() {
        let repo = MemoryUserRepository::new();

        let err = UserService::get_user(&repo, "not-a-uuid").await.unwrap_err();
        assert_eq!(err.to_string(), "WRONG_USER_ID");

        let err = UserService::get_user(&repo, &Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = UserService::update_user(
            &repo,
            &Uuid::new_v4().to_string(),
            UpdateUserRequest {
                name: Some("x".into()),
                email: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "USER_NOT_FOUND");
    }
}
