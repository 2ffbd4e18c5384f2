//! Application configuration module
//!
//! Configuration is loaded from environment variables with the `TRIPMATE`
//! prefix using the `config` and `dotenvy` crates. Nested values are
//! separated with a double underscore.
//!
//! # Example
//!
//! ```no_run
//! use tripmate::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.bind_address());
//! ```

mod ai;
mod auth;
mod database;
mod error;
mod server;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection or `memory://`)
    pub database: DatabaseConfig,

    /// Token signing and Google sign-in
    pub auth: AuthConfig,

    /// Completion API configuration
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `TRIPMATE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TRIPMATE__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// A `.env` file in the working directory is read first when present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRIPMATE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.ai.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("TRIPMATE__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var(
            "TRIPMATE__AUTH__JWT_SECRET",
            "a-very-long-development-secret-for-tests",
        );
        env::set_var("TRIPMATE__AI__OPENAI_API_KEY", "sk-test");
    }

    fn clear_env() {
        env::remove_var("TRIPMATE__DATABASE__URL");
        env::remove_var("TRIPMATE__AUTH__JWT_SECRET");
        env::remove_var("TRIPMATE__AI__OPENAI_API_KEY");
        env::remove_var("TRIPMATE__AI__MODEL");
        env::remove_var("TRIPMATE__SERVER__PORT");
        env::remove_var("TRIPMATE__SERVER__ENVIRONMENT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(config.auth.access_token_expire_minutes, 30);
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_port_and_model() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("TRIPMATE__SERVER__PORT", "3000");
        env::set_var("TRIPMATE__AI__MODEL", "gpt-4o");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.ai.model, "gpt-4o");
    }

    #[test]
    fn test_missing_database_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(
            "TRIPMATE__AUTH__JWT_SECRET",
            "a-very-long-development-secret-for-tests",
        );
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("TRIPMATE__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }
}
