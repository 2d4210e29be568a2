//! Server configuration.

use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// JWT expiration in hours.
    pub jwt_expiration_hours: u64,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = env::var("RESPLAN_JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("RESPLAN_JWT_SECRET is required"))?;

        Ok(Self {
            host: env::var("RESPLAN_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("RESPLAN_SERVER_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            jwt_secret,
            jwt_expiration_hours: env::var("RESPLAN_JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .unwrap_or(24),
            log_level: env::var("RESPLAN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_with_secret_set() {
        // SAFETY: Tests run serially or in isolation
        unsafe {
            env::set_var("RESPLAN_JWT_SECRET", "test-secret");
            env::remove_var("RESPLAN_SERVER_HOST");
            env::remove_var("RESPLAN_SERVER_PORT");
            env::remove_var("RESPLAN_JWT_EXPIRATION_HOURS");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.jwt_expiration_hours, 24);
        assert_eq!(config.server_addr(), "0.0.0.0:5000");
    }
}
