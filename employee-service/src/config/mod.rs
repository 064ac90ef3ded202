use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "fiber-hrms";

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    /// Bound on establishing the initial connection at startup.
    pub connect_timeout_secs: u64,
}

impl MongoConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl EmployeeConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(EmployeeConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", Some(DEFAULT_MONGODB_URI), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some(DEFAULT_DATABASE), is_prod)?,
                connect_timeout_secs: get_env("MONGODB_CONNECT_TIMEOUT_SECS", Some("30"), false)?
                    .parse()
                    .map_err(|e| {
                        AppError::ConfigError(anyhow::anyhow!(
                            "MONGODB_CONNECT_TIMEOUT_SECS must be a whole number of seconds: {}",
                            e
                        ))
                    })?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_falls_back_to_default_outside_prod() {
        let value = get_env("EMPLOYEE_TEST_UNSET_KEY_1", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn test_get_env_requires_value_in_prod() {
        let err = get_env("EMPLOYEE_TEST_UNSET_KEY_2", Some("fallback"), true).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("required in production"));
    }

    #[test]
    fn test_get_env_without_default_is_an_error() {
        let err = get_env("EMPLOYEE_TEST_UNSET_KEY_3", None, false).unwrap_err();
        assert!(err.to_string().contains("EMPLOYEE_TEST_UNSET_KEY_3 is required"));
    }

    #[test]
    fn test_database_defaults_to_fiber_hrms() {
        let value = get_env("EMPLOYEE_TEST_UNSET_KEY_4", Some(DEFAULT_DATABASE), false).unwrap();
        assert_eq!(value, "fiber-hrms");
    }

    #[test]
    fn test_connect_timeout_is_in_seconds() {
        let config = MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "fiber-hrms".to_string(),
            connect_timeout_secs: 30,
        };
        assert_eq!(config.connect_timeout(), Duration::from_secs(30));
    }
}
