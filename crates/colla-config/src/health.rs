//! Health check settings.

use serde::{Deserialize, Serialize};

/// Disk usage above this percentage triggers a warning.
const fn default_disk_threshold_percent() -> u8 {
    90
}

fn default_bot_unit() -> String {
    "collalearn".into()
}

fn default_database_unit() -> String {
    "mongod".into()
}

fn default_mount() -> String {
    "/".into()
}

fn default_systemctl_program() -> String {
    "systemctl".into()
}

fn default_df_program() -> String {
    "df".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthConfig {
    /// systemd unit running the bot.
    #[serde(default = "default_bot_unit")]
    pub bot_unit: String,

    /// systemd unit running the database.
    #[serde(default = "default_database_unit")]
    pub database_unit: String,

    /// Mount point whose usage is checked.
    #[serde(default = "default_mount")]
    pub mount: String,

    #[serde(default = "default_disk_threshold_percent")]
    pub disk_threshold_percent: u8,

    #[serde(default = "default_systemctl_program")]
    pub systemctl_program: String,

    #[serde(default = "default_df_program")]
    pub df_program: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            bot_unit: default_bot_unit(),
            database_unit: default_database_unit(),
            mount: default_mount(),
            disk_threshold_percent: default_disk_threshold_percent(),
            systemctl_program: default_systemctl_program(),
            df_program: default_df_program(),
        }
    }
}
