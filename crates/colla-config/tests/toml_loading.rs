//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed cwd and env var manipulation.

use std::path::{Path, PathBuf};

use colla_config::{ConfigError, OpsConfig};
use figment::Jail;

#[test]
fn local_colla_toml_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "colla.toml",
            r#"
[database]
name = "collalearn_staging"
uri = "mongodb://db.internal:27017/"

[backup]
root = "/srv/backups"
retention = 14
env_file = "/opt/collalearn/.env"
require_env_file = true
"#,
        )?;

        let config = OpsConfig::load(None).expect("config loads");
        assert_eq!(config.database.name, "collalearn_staging");
        assert!(config.database.has_uri());
        assert_eq!(config.backup.root, PathBuf::from("/srv/backups"));
        assert_eq!(config.backup.retention, 14);
        assert_eq!(config.backup.env_file, PathBuf::from("/opt/collalearn/.env"));
        assert!(config.backup.require_env_file);
        // untouched sections keep defaults
        assert_eq!(config.health.bot_unit, "collalearn");
        assert_eq!(config.ai.model, "sonar");
        Ok(())
    });
}

#[test]
fn explicit_file_replaces_local_file() {
    Jail::expect_with(|jail| {
        jail.create_file("colla.toml", "[health]\nbot_unit = \"from-local\"\n")?;
        jail.create_file("custom.toml", "[health]\nmount = \"/data\"\n")?;

        let config = OpsConfig::load(Some(Path::new("custom.toml"))).expect("config loads");
        assert_eq!(config.health.mount, "/data");
        assert_eq!(config.health.bot_unit, "collalearn");
        Ok(())
    });
}

#[test]
fn user_config_is_overridden_by_local() {
    Jail::expect_with(|jail| {
        let xdg = jail.directory().join("xdg");
        std::fs::create_dir_all(xdg.join("collalearn")).expect("mkdir");
        std::fs::write(
            xdg.join("collalearn").join("ops.toml"),
            "[health]\ndisk_threshold_percent = 80\nbot_unit = \"user-bot\"\n",
        )
        .expect("write user config");
        jail.set_env("XDG_CONFIG_HOME", xdg.display());
        jail.create_file("colla.toml", "[health]\nbot_unit = \"local-bot\"\n")?;

        let config = OpsConfig::load(None).expect("config loads");
        assert_eq!(config.health.bot_unit, "local-bot");
        assert_eq!(config.health.disk_threshold_percent, 80);
        Ok(())
    });
}

#[test]
fn invalid_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_file("colla.toml", "[backup]\nretention = 0\n")?;

        let err = OpsConfig::load(None).expect_err("retention 0 rejected");
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "backup.retention"));
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file("colla.toml", "[backup\nretention = 3\n")?;

        let err = OpsConfig::load(None).expect_err("parse error");
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
