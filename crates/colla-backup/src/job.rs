//! The backup run: lock, dump, stage, archive, verify, publish, prune.

use std::path::{Path, PathBuf};

use colla_config::{BackupConfig, OpsConfig};
use colla_core::responses::BackupReport;

use crate::archive::{self, ArchiveEntry, ENV_ENTRY_PREFIX};
use crate::clock::{Clock, SystemClock};
use crate::dump::{DumpTool, MongoDump};
use crate::error::BackupError;
use crate::lock::RunLock;
use crate::naming::ArchiveName;
use crate::retention;

const STAGING_PREFIX: &str = ".staging-";
const PARTIAL_SUFFIX: &str = ".partial";

pub struct BackupJob<D, C> {
    database: String,
    config: BackupConfig,
    dumper: D,
    clock: C,
}

impl BackupJob<MongoDump, SystemClock> {
    #[must_use]
    pub fn from_config(config: &OpsConfig) -> Self {
        Self::new(
            config.database.name.clone(),
            config.backup.clone(),
            MongoDump::from_config(&config.database),
            SystemClock,
        )
    }
}

impl<D: DumpTool, C: Clock> BackupJob<D, C> {
    pub fn new(database: String, config: BackupConfig, dumper: D, clock: C) -> Self {
        Self {
            database,
            config,
            dumper,
            clock,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BackupConfig {
        &self.config
    }

    /// Produce one verified archive, then prune to the retention count.
    ///
    /// Nothing is pruned unless the new archive was written and read back
    /// successfully.
    ///
    /// # Errors
    ///
    /// Any step's `BackupError`; the staging directory and partial archive
    /// are removed before returning.
    pub fn run(&self) -> Result<BackupReport, BackupError> {
        let root = &self.config.root;
        std::fs::create_dir_all(root).map_err(BackupError::io(root))?;
        let _lock = RunLock::acquire(root)?;

        let stale_staging_removed = remove_leftovers(root)?;

        let env_file_included = self.config.env_file.is_file();
        if !env_file_included {
            if self.config.require_env_file {
                return Err(BackupError::MissingEnvFile {
                    path: self.config.env_file.clone(),
                });
            }
            tracing::warn!(
                env_file = %self.config.env_file.display(),
                "env file not found; archiving the dump only"
            );
        }

        let name = next_free_name(root, &self.clock.stamp())?;
        let label = name.label();
        let archive_path = root.join(name.file_name());
        let partial_path = root.join(format!("{}{PARTIAL_SUFFIX}", name.file_name()));

        let staging = Staging::create(root.join(format!("{STAGING_PREFIX}{label}")))?;
        let dump_dir = staging.path().join(&label);
        self.dumper.dump(&self.database, &dump_dir)?;
        if !has_any_entry(&dump_dir) {
            return Err(BackupError::EmptyDump { path: dump_dir });
        }

        let env_name = format!("{ENV_ENTRY_PREFIX}{label}");
        let staged_env = staging.path().join(&env_name);
        if env_file_included {
            std::fs::copy(&self.config.env_file, &staged_env)
                .map_err(BackupError::io(&self.config.env_file))?;
        }

        let mut entries = vec![ArchiveEntry {
            source: &dump_dir,
            name: &label,
        }];
        if env_file_included {
            entries.push(ArchiveEntry {
                source: &staged_env,
                name: &env_name,
            });
        }

        let partial = Partial(partial_path);
        let size_bytes = archive::write_archive(partial.path(), &entries)?;
        let summary = archive::verify_archive(partial.path())?;
        if !summary.has_dump || summary.has_env != env_file_included {
            return Err(BackupError::CorruptArchive {
                path: partial.path().to_path_buf(),
                reason: "archive contents do not match the staged batch".into(),
            });
        }
        partial.publish(&archive_path)?;
        tracing::info!(archive = %archive_path.display(), size_bytes, "backup archive written");

        drop(staging);

        let prune = retention::prune_keeping(root, self.config.retention, &archive_path)?;

        Ok(BackupReport {
            archive: archive_path,
            stamp: name.stamp,
            size_bytes,
            entries: summary.entries,
            env_file_included,
            stale_staging_removed,
            pruned: prune.pruned,
            kept: prune.kept,
        })
    }
}

/// First `backup_<stamp>[_n].tar.gz` under `root` that does not exist yet.
fn next_free_name(root: &Path, stamp: &str) -> Result<ArchiveName, BackupError> {
    let mut name = ArchiveName::new(stamp, 0)?;
    while root.join(name.file_name()).exists() {
        name = name.next();
    }
    Ok(name)
}

/// Remove staging directories and partial archives left by an interrupted run.
fn remove_leftovers(root: &Path) -> Result<Vec<PathBuf>, BackupError> {
    let mut removed = Vec::new();
    for entry in std::fs::read_dir(root).map_err(BackupError::io(root))? {
        let path = entry.map_err(BackupError::io(root))?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if file_name.starts_with(STAGING_PREFIX) && path.is_dir() {
            std::fs::remove_dir_all(&path).map_err(BackupError::io(&path))?;
        } else if file_name.ends_with(PARTIAL_SUFFIX) && path.is_file() {
            std::fs::remove_file(&path).map_err(BackupError::io(&path))?;
        } else {
            continue;
        }
        tracing::warn!(path = %path.display(), "removed leftover from an interrupted backup");
        removed.push(path);
    }
    removed.sort();
    Ok(removed)
}

fn has_any_entry(dir: &Path) -> bool {
    std::fs::read_dir(dir).is_ok_and(|mut entries| entries.next().is_some())
}

/// Uncompressed batch directory; removed when dropped.
struct Staging(PathBuf);

impl Staging {
    fn create(path: PathBuf) -> Result<Self, BackupError> {
        std::fs::create_dir_all(&path).map_err(BackupError::io(&path))?;
        Ok(Self(path))
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for Staging {
    fn drop(&mut self) {
        if let Err(error) = std::fs::remove_dir_all(&self.0) {
            tracing::warn!(path = %self.0.display(), %error, "failed to remove staging directory");
        }
    }
}

/// Archive being written; whatever is still at the partial path is removed on drop.
struct Partial(PathBuf);

impl Partial {
    fn path(&self) -> &Path {
        &self.0
    }

    fn publish(&self, dest: &Path) -> Result<(), BackupError> {
        std::fs::rename(&self.0, dest).map_err(BackupError::io(dest))
    }
}

impl Drop for Partial {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}
