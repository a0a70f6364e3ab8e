use crate::env_opt;

/// Credentials for the administrator created on first start.
///
/// Bootstrap is skipped unless both email and password are present.
#[derive(Clone, Debug, Default)]
pub struct AdminConfig {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl AdminConfig {
    pub fn from_env() -> Self {
        Self {
            name: env_opt("ADMIN_NAME"),
            email: env_opt("ADMIN_EMAIL"),
            password: env_opt("ADMIN_PASSWORD"),
        }
    }

    /// Returns `(name, email, password)` when bootstrap is configured.
    /// The name falls back to `"admin"`.
    pub fn credentials(&self) -> Option<(&str, &str, &str)> {
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => Some((
                self.name.as_deref().unwrap_or("admin"),
                email.as_str(),
                password.as_str(),
            )),
            _ => None,
        }
    }
}
