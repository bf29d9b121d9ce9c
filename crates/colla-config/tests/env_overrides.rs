use colla_config::OpsConfig;
use figment::Jail;

#[test]
fn prefixed_env_overrides_nested_fields() {
    Jail::expect_with(|jail| {
        jail.set_env("COLLALEARN_BACKUP__RETENTION", "3");
        jail.set_env("COLLALEARN_HEALTH__DATABASE_UNIT", "mongodb");

        let config = OpsConfig::load(None).expect("config loads");
        assert_eq!(config.backup.retention, 3);
        assert_eq!(config.health.database_unit, "mongodb");
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("colla.toml", "[ai]\nmodel = \"sonar-pro\"\ntimeout_secs = 10\n")?;
        jail.set_env("COLLALEARN_AI__MODEL", "sonar-reasoning");

        let config = OpsConfig::load(None).expect("config loads");
        assert_eq!(config.ai.model, "sonar-reasoning");
        assert_eq!(config.ai.timeout_secs, 10);
        Ok(())
    });
}

#[test]
fn unprefixed_bot_variables_do_not_leak_into_config() {
    Jail::expect_with(|jail| {
        jail.set_env("BOT_TOKEN", "123:abc");
        jail.set_env("MONGODB_URI", "mongodb://elsewhere/");

        let config = OpsConfig::load(None).expect("config loads");
        assert!(!config.database.has_uri());
        Ok(())
    });
}
