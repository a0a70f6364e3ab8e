use std::time::Duration;

use crate::{env_opt, env_or};

pub const DEFAULT_FACILITY: &str = "gatehouse";
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 180;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Service name stamped on every log line
    pub facility: String,
    /// How long in-flight requests may run after a shutdown signal
    pub shutdown_grace_secs: u64,
    /// Serve Prometheus metrics on `/metrics`
    pub metrics_enabled: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env_opt("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            facility: env_opt("FACILITY").unwrap_or_else(|| DEFAULT_FACILITY.to_string()),
            shutdown_grace_secs: env_or("SHUTDOWN_GRACE_SECS", DEFAULT_SHUTDOWN_GRACE_SECS),
            metrics_enabled: env_opt("METRICS_ENABLED")
                .map(|v| is_enabled(&v))
                .unwrap_or(true),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

fn is_enabled(value: &str) -> bool {
    let value = value.trim();
    !(value == "0" || value.eq_ignore_ascii_case("false") || value.eq_ignore_ascii_case("off"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            facility: DEFAULT_FACILITY.to_string(),
            shutdown_grace_secs: DEFAULT_SHUTDOWN_GRACE_SECS,
            metrics_enabled: true,
        };

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.shutdown_grace(), Duration::from_secs(180));
    }

    #[test]
    fn test_metrics_switch() {
        assert!(is_enabled("true"));
        assert!(is_enabled("1"));
        assert!(!is_enabled("false"));
        assert!(!is_enabled("FALSE"));
        assert!(!is_enabled(" 0 "));
        assert!(!is_enabled("off"));
    }
}
