//! Layered Service Configuration
//!
//! Defaults, then `config/icu-ai.toml` if present, then `ICU_AI__*`
//! environment variables (e.g. `ICU_AI__SERVER__PORT=9000`).

use config::{Config, ConfigError, Environment, File, Source};
use risk_engine::TrainingConfig;
use serde::{Deserialize, Serialize};
use vitals_validator::ValidationConfig;

/// Optional configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/icu-ai";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "ICU_AI";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted `/batch-predict` payload
    pub max_batch_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_batch_size: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Full service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub training: TrainingConfig,
    pub validation: ValidationConfig,
}

impl ServiceConfig {
    /// Load from the default file location and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load from `path` (extension optional, file optional) and the process environment
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Self::layered(File::with_name(path).required(false), Self::environment())
    }

    /// Layer `file` and `env` over the built-in defaults
    pub fn layered<F>(file: F, env: Environment) -> Result<Self, ConfigError>
    where
        F: Source + Send + Sync + 'static,
    {
        let defaults = Config::try_from(&ServiceConfig::default())?;

        Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    /// Environment source for `ICU_AI__SECTION__KEY` variables
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true)
    }

    /// `host:port` listen address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{FileFormat, Map};

    fn no_env() -> Environment {
        ServiceConfig::environment().source(Some(Map::new()))
    }

    #[test]
    fn test_defaults_without_file() {
        let config = ServiceConfig::layered(File::from_str("", FileFormat::Toml), no_env()).unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.max_batch_size, 1000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.training.risk.samples, 2000);
        assert_eq!(config.training.risk.forest.max_depth, Some(10));
        assert_eq!(config.training.bed.forest.max_depth, None);
        assert_eq!(config.validation.heart_rate_range, (0.0, 300.0));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let toml = r#"
            [server]
            port = 9100

            [training.risk.forest]
            n_estimators = 20
        "#;
        let config = ServiceConfig::layered(File::from_str(toml, FileFormat::Toml), no_env()).unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.training.risk.forest.n_estimators, 20);
        assert_eq!(config.training.risk.forest.max_depth, Some(10));
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut vars = Map::new();
        vars.insert("ICU_AI__SERVER__PORT".to_string(), "9200".to_string());
        vars.insert("ICU_AI__LOGGING__JSON".to_string(), "true".to_string());
        let env = ServiceConfig::environment().source(Some(vars));

        let toml = "[server]\nport = 9100\n";
        let config = ServiceConfig::layered(File::from_str(toml, FileFormat::Toml), env).unwrap();

        assert_eq!(config.server.port, 9200);
        assert!(config.logging.json);
        assert_eq!(config.bind_address(), "0.0.0.0:9200");
    }
}
