use std::env;

use crate::validation::NegativeDuePolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: Option<String>,
    pub jwt_expiration_hours: i64,
    pub max_pool_size: u32,
    pub negative_dues: NegativeDuePolicy,
}

impl Config {
    /// Load the configuration from the process environment and `.env`
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server_host: read("SERVER_HOST", "0.0.0.0"),
            server_port: read("SERVER_PORT", "8080")
                .parse()
                .map_err(|_| ConfigError::Invalid("SERVER_PORT"))?,
            database_url: read("DATABASE_URL", "sqlite://fieldlist.db"),
            jwt_secret: lookup("JWT_SECRET").filter(|s| !s.is_empty()),
            jwt_expiration_hours: read("JWT_EXPIRATION_HOURS", "24")
                .parse()
                .map_err(|_| ConfigError::Invalid("JWT_EXPIRATION_HOURS"))?,
            max_pool_size: read("MAX_POOL_SIZE", "5")
                .parse()
                .map_err(|_| ConfigError::Invalid("MAX_POOL_SIZE"))?,
            negative_dues: read("NEGATIVE_DUES", "reject")
                .parse()
                .map_err(|_| ConfigError::Invalid("NEGATIVE_DUES"))?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// The token signing secret; only the server needs one
    pub fn require_jwt_secret(&self) -> Result<&str, ConfigError> {
        self.jwt_secret
            .as_deref()
            .ok_or(ConfigError::Missing("JWT_SECRET"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid value for {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.database_url, "sqlite://fieldlist.db");
        assert_eq!(config.jwt_expiration_hours, 24);
        assert_eq!(config.max_pool_size, 5);
        assert_eq!(config.negative_dues, NegativeDuePolicy::Reject);
        assert!(matches!(
            config.require_jwt_secret(),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SERVER_PORT", "9000"),
            ("JWT_SECRET", "s3cret"),
            ("NEGATIVE_DUES", "allow"),
        ])
        .unwrap();
        assert_eq!(config.server_port, 9000);
        assert_eq!(config.require_jwt_secret().unwrap(), "s3cret");
        assert_eq!(config.negative_dues, NegativeDuePolicy::Allow);
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("SERVER_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("SERVER_PORT")));
    }
}
