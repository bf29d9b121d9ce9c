//! # colla-config
//!
//! Layered configuration loading for the CollaLearn ops tooling using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`COLLALEARN_*` prefix, `__` as separator)
//! 2. An explicit `--config` file, or `./colla.toml` when present
//! 3. User-level `~/.config/collalearn/ops.toml`
//! 4. System-level `/etc/collalearn/ops.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `COLLALEARN_BACKUP__RETENTION` -> `backup.retention`,
//! `COLLALEARN_HEALTH__BOT_UNIT` -> `health.bot_unit`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use colla_config::OpsConfig;
//!
//! let config = OpsConfig::load_with_dotenv(None).expect("config");
//! println!("backups go to {}", config.backup.root.display());
//! ```
//!
//! The bot's own `.env` (credentials the bot process reads) is modelled
//! separately by [`BotEnv`].

mod ai;
mod backup;
mod bot_env;
mod database;
mod error;
mod health;

pub use ai::AiConfig;
pub use backup::BackupConfig;
pub use bot_env::{AdminIds, BotEnv, DEFAULT_MONGODB_URI, PLACEHOLDER_API_KEY};
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use health::HealthConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "COLLALEARN_";

const SYSTEM_CONFIG_PATH: &str = "/etc/collalearn/ops.toml";
const LOCAL_CONFIG_PATH: &str = "colla.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OpsConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub backup: BackupConfig,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub ai: AiConfig,
}

impl OpsConfig {
    /// Load and validate configuration from all sources.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingFile` when `explicit` does not exist,
    /// `ConfigError::Figment` on parse errors, and `ConfigError::InvalidValue`
    /// when validation fails.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(explicit)?.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can extract from it directly or layer extra providers.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingFile` when `explicit` does not exist.
    pub fn figment(explicit: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let system_path = PathBuf::from(SYSTEM_CONFIG_PATH);
        if system_path.exists() {
            figment = figment.merge(Toml::file(system_path));
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                figment = figment.merge(Toml::file(user_path));
            }
        }

        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::MissingFile {
                        path: path.to_path_buf(),
                    });
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
                if local_path.exists() {
                    figment = figment.merge(Toml::file(local_path));
                }
            }
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Reject values the jobs cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty("database.name", &self.database.name)?;
        require_non_empty("database.dump_program", &self.database.dump_program)?;
        require_non_empty("health.bot_unit", &self.health.bot_unit)?;
        require_non_empty("health.database_unit", &self.health.database_unit)?;
        require_non_empty("health.mount", &self.health.mount)?;

        if self.backup.root.as_os_str().is_empty() {
            return Err(invalid("backup.root", "must not be empty"));
        }
        if self.backup.retention == 0 {
            return Err(invalid("backup.retention", "must keep at least one archive"));
        }
        if !(1..=100).contains(&self.health.disk_threshold_percent) {
            return Err(invalid(
                "health.disk_threshold_percent",
                "must be between 1 and 100",
            ));
        }
        if self.ai.timeout_secs == 0 {
            return Err(invalid("ai.timeout_secs", "must be greater than zero"));
        }
        Ok(())
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("collalearn").join("ops.toml"))
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = OpsConfig::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.backup.retention, 7);
        assert_eq!(config.database.name, "collalearn");
    }

    #[test]
    fn zero_retention_is_rejected() {
        let mut config = OpsConfig::default();
        config.backup.retention = 0;
        let err = config.validate().expect_err("retention 0 must fail");
        assert!(err.to_string().contains("backup.retention"));
    }

    #[test]
    fn threshold_over_hundred_is_rejected() {
        let mut config = OpsConfig::default();
        config.health.disk_threshold_percent = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_unit_is_rejected() {
        let mut config = OpsConfig::default();
        config.health.database_unit = "  ".into();
        let err = config.validate().expect_err("blank unit must fail");
        assert!(err.to_string().contains("health.database_unit"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = OpsConfig::figment(Some(Path::new("/nonexistent/colla.toml")))
            .expect_err("missing file must fail");
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }
}
