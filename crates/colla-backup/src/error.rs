use std::path::PathBuf;

use colla_core::{CommandError, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dump failed: {0}")]
    Dump(#[from] CommandError),

    #[error("dump produced no files in {}", path.display())]
    EmptyDump { path: PathBuf },

    #[error("env file {} does not exist", path.display())]
    MissingEnvFile { path: PathBuf },

    #[error("archive {} is not usable: {reason}", path.display())]
    CorruptArchive { path: PathBuf, reason: String },

    #[error("another backup is running (pid {pid}); lock file {}", path.display())]
    Locked { pid: i32, path: PathBuf },

    #[error("could not read lock file {}; remove it if no backup is running", path.display())]
    LockUnreadable { path: PathBuf },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl BackupError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
