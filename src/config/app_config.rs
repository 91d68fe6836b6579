use serde::Deserialize;

use crate::domain::rules::GameRules;
use crate::domain::DomainError;
use crate::infrastructure::observability::MetricsConfig;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub game: GameRules,
    pub storage: StorageSettings,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Bearer token settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret; a random one is generated when unset
    pub jwt_secret: Option<String>,
    /// Validity of tokens issued without an explicit one
    pub default_token_minutes: i64,
    /// Validity of tokens issued by the login endpoint
    pub login_token_minutes: i64,
}

/// Store backend selection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            default_token_minutes: 15,
            login_token_minutes: 30,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
            max_connections: 10,
        }
    }
}

impl StorageSettings {
    /// Resolve the backend into a store configuration
    pub fn to_storage_config(&self) -> Result<StorageConfig, DomainError> {
        let backend = StorageType::parse(&self.backend).ok_or_else(|| {
            DomainError::configuration(format!("Unknown storage backend '{}'", self.backend))
        })?;

        match backend {
            StorageType::InMemory => Ok(StorageConfig::in_memory()),
            StorageType::Postgres => {
                let url = self.database_url.as_deref().ok_or_else(|| {
                    DomainError::configuration("storage.database_url is required for postgres")
                })?;

                Ok(StorageConfig::postgres(
                    PostgresConfig::new(url).with_max_connections(self.max_connections),
                ))
            }
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject settings the game cannot run with
    pub fn validate(&self) -> Result<(), DomainError> {
        self.game.validate()?;

        if self.auth.default_token_minutes <= 0 || self.auth.login_token_minutes <= 0 {
            return Err(DomainError::configuration("Token validity must be positive"));
        }

        self.metrics.validate()?;

        self.storage.to_storage_config().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::MarkupRange;

    fn from_toml(source: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.default_token_minutes, 15);
        assert_eq!(config.auth.login_token_minutes, 30);
        assert_eq!(config.game, GameRules::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = from_toml(
            r#"
            [server]
            port = 9000

            [game.markup]
            min = 110
            max = 200
            "#,
        );

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.game.markup, MarkupRange { min: 110, max: 200 });
        assert_eq!(config.game.starting_budget, 5_000_000);
    }

    #[test]
    fn test_log_format() {
        let config = from_toml(
            r#"
            [logging]
            format = "json"
            "#,
        );

        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_markup_rejected() {
        let config = from_toml(
            r#"
            [game.markup]
            min = 80
            max = 20
            "#,
        );

        assert!(matches!(
            config.validate(),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_postgres_requires_url() {
        let mut settings = StorageSettings {
            backend: "postgres".to_string(),
            ..StorageSettings::default()
        };
        assert!(settings.to_storage_config().is_err());

        settings.database_url = Some("postgres://localhost/game".to_string());
        let config = settings.to_storage_config().unwrap();
        assert_eq!(config.storage_type(), StorageType::Postgres);
    }

    #[test]
    fn test_unknown_backend() {
        let settings = StorageSettings {
            backend: "sqlite".to_string(),
            ..StorageSettings::default()
        };

        assert!(settings.to_storage_config().is_err());
    }
}
