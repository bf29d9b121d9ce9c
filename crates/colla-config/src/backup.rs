//! Backup job settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Number of archives kept after pruning.
const fn default_retention() -> usize {
    7
}

fn default_root() -> PathBuf {
    PathBuf::from("/var/backups/collalearn")
}

fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackupConfig {
    /// Directory holding `backup_*.tar.gz` archives and the run lock.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Most recent archives kept by pruning.
    #[serde(default = "default_retention")]
    pub retention: usize,

    /// Bot environment file copied into every archive.
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,

    /// Fail the run instead of warning when `env_file` is missing.
    #[serde(default)]
    pub require_env_file: bool,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            retention: default_retention(),
            env_file: default_env_file(),
            require_env_file: false,
        }
    }
}
