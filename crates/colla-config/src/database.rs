//! Database dump settings.

use serde::{Deserialize, Serialize};

fn default_name() -> String {
    "collalearn".into()
}

fn default_dump_program() -> String {
    "mongodump".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Logical database name passed to `--db`.
    #[serde(default = "default_name")]
    pub name: String,

    /// Connection string passed to `--uri`. Empty means the dump tool's default.
    #[serde(default)]
    pub uri: String,

    /// Export utility to invoke.
    #[serde(default = "default_dump_program")]
    pub dump_program: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            uri: String::new(),
            dump_program: default_dump_program(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn has_uri(&self) -> bool {
        !self.uri.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_collalearn_with_mongodump() {
        let config = DatabaseConfig::default();
        assert_eq!(config.name, "collalearn");
        assert_eq!(config.dump_program, "mongodump");
        assert!(!config.has_uri());
    }
}
