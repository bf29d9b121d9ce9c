//! Logical database export.

use std::path::Path;

use colla_config::DatabaseConfig;
use colla_core::command;

use crate::error::BackupError;

/// Writes a full logical dump of `database` into `out_dir`.
pub trait DumpTool {
    /// # Errors
    ///
    /// Returns `BackupError::Dump` if the export utility fails.
    fn dump(&self, database: &str, out_dir: &Path) -> Result<(), BackupError>;
}

/// `mongodump --db <name> --out <dir> [--uri <uri>]`.
#[derive(Debug, Clone)]
pub struct MongoDump {
    program: String,
    uri: Option<String>,
}

impl MongoDump {
    #[must_use]
    pub fn new(program: impl Into<String>, uri: Option<String>) -> Self {
        Self {
            program: program.into(),
            uri,
        }
    }

    #[must_use]
    pub fn from_config(config: &DatabaseConfig) -> Self {
        let uri = config.has_uri().then(|| config.uri.clone());
        Self::new(config.dump_program.clone(), uri)
    }

    fn args(&self, database: &str, out_dir: &Path) -> Vec<String> {
        let mut args = Vec::with_capacity(6);
        if let Some(uri) = &self.uri {
            args.push("--uri".to_string());
            args.push(uri.clone());
        }
        args.push("--db".to_string());
        args.push(database.to_string());
        args.push("--out".to_string());
        args.push(out_dir.to_string_lossy().into_owned());
        args
    }
}

impl DumpTool for MongoDump {
    fn dump(&self, database: &str, out_dir: &Path) -> Result<(), BackupError> {
        tracing::info!(database, out = %out_dir.display(), "dumping database");
        command::run_checked(&self.program, self.args(database, out_dir))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_without_uri() {
        let tool = MongoDump::from_config(&DatabaseConfig::default());
        assert_eq!(
            tool.args("collalearn", Path::new("/b/20251115_030405")),
            vec!["--db", "collalearn", "--out", "/b/20251115_030405"]
        );
    }

    #[test]
    fn uri_goes_first_when_configured() {
        let config = DatabaseConfig {
            uri: "mongodb://db:27017/".into(),
            ..Default::default()
        };
        let args = MongoDump::from_config(&config).args("collalearn", Path::new("/out"));
        assert_eq!(args[..2], ["--uri", "mongodb://db:27017/"]);
    }

    #[cfg(unix)]
    #[test]
    fn failing_dump_surfaces_stderr() {
        let tool = MongoDump::new("false", None);
        let dir = tempfile::tempdir().expect("tempdir");
        let err = tool.dump("collalearn", dir.path()).expect_err("false exits 1");
        assert!(matches!(err, BackupError::Dump(_)));
    }
}
