//! Enumerating and pruning archives.
//!
//! Newest-first means latest modification time, with ties broken by the
//! stamp and sequence in the file name. Files whose names do not parse as
//! archives are never listed and never deleted.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use colla_core::responses::{ArchiveInfo, PruneReport};

use crate::error::BackupError;
use crate::naming::ArchiveName;

/// All archives under `root`, newest first.
///
/// A missing `root` yields an empty list.
///
/// # Errors
///
/// Returns `BackupError::Io` if the directory or a file's metadata cannot be read.
pub fn list_archives(root: &Path) -> Result<Vec<ArchiveInfo>, BackupError> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut found = Vec::<(SystemTime, ArchiveName, PathBuf, u64)>::new();
    for entry in std::fs::read_dir(root).map_err(BackupError::io(root))? {
        let entry = entry.map_err(BackupError::io(root))?;
        let path = entry.path();
        let Some(name) = ArchiveName::from_path(&path) else {
            continue;
        };
        let metadata = entry.metadata().map_err(BackupError::io(&path))?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().map_err(BackupError::io(&path))?;
        found.push((modified, name, path, metadata.len()));
    }

    found.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));

    Ok(found
        .into_iter()
        .map(|(modified, name, path, size_bytes)| ArchiveInfo {
            path,
            stamp: name.stamp,
            sequence: name.sequence,
            size_bytes,
            modified: DateTime::<Utc>::from(modified),
        })
        .collect())
}

/// Delete every archive beyond the `retention` newest.
///
/// # Errors
///
/// Returns `BackupError::Io` if listing or a deletion fails. Archives deleted
/// before the failure stay deleted.
pub fn prune(root: &Path, retention: usize) -> Result<PruneReport, BackupError> {
    prune_ranked(retention, list_archives(root)?)
}

/// Like [`prune`], but `newest` always survives and takes the first slot.
///
/// Used right after publishing `newest`, whose mtime may sort below archives
/// stamped in the future by a skewed clock.
///
/// # Errors
///
/// Same as [`prune`].
pub fn prune_keeping(
    root: &Path,
    retention: usize,
    newest: &Path,
) -> Result<PruneReport, BackupError> {
    let (mut ranked, rest): (Vec<_>, Vec<_>) = list_archives(root)?
        .into_iter()
        .partition(|archive| archive.path == newest);
    ranked.extend(rest);
    prune_ranked(retention.max(1), ranked)
}

fn prune_ranked(retention: usize, archives: Vec<ArchiveInfo>) -> Result<PruneReport, BackupError> {
    let kept = archives.len().min(retention);

    let mut pruned = Vec::new();
    for archive in archives.into_iter().skip(retention) {
        std::fs::remove_file(&archive.path).map_err(BackupError::io(&archive.path))?;
        tracing::info!(archive = %archive.path.display(), "pruned old backup");
        pruned.push(archive.path);
    }

    Ok(PruneReport {
        retention,
        kept,
        pruned,
    })
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;

    fn touch(root: &Path, name: &str, age_secs: u64) -> PathBuf {
        let path = root.join(name);
        let file = File::create(&path).expect("create");
        file.set_modified(SystemTime::now() - Duration::from_secs(age_secs))
            .expect("set mtime");
        path
    }

    fn names(archives: &[ArchiveInfo]) -> Vec<String> {
        archives
            .iter()
            .map(|a| {
                a.path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            })
            .collect()
    }

    #[test]
    fn lists_newest_first_by_mtime() {
        let dir = tempfile::tempdir().expect("tempdir");
        // name order disagrees with mtime order on purpose
        touch(dir.path(), "backup_20250101_000000.tar.gz", 10);
        touch(dir.path(), "backup_20250301_000000.tar.gz", 300);
        touch(dir.path(), "backup_20250201_000000.tar.gz", 100);

        let archives = list_archives(dir.path()).expect("list");
        assert_eq!(
            names(&archives),
            vec![
                "backup_20250101_000000.tar.gz",
                "backup_20250201_000000.tar.gz",
                "backup_20250301_000000.tar.gz",
            ]
        );
    }

    #[test]
    fn equal_mtimes_fall_back_to_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let when = SystemTime::now() - Duration::from_secs(60);
        for name in [
            "backup_20250101_000000.tar.gz",
            "backup_20250101_000000_1.tar.gz",
            "backup_20250101_000001.tar.gz",
        ] {
            File::create(dir.path().join(name))
                .and_then(|f| f.set_modified(when))
                .expect("create");
        }

        let archives = list_archives(dir.path()).expect("list");
        assert_eq!(
            names(&archives),
            vec![
                "backup_20250101_000001.tar.gz",
                "backup_20250101_000000_1.tar.gz",
                "backup_20250101_000000.tar.gz",
            ]
        );
    }

    #[test]
    fn prune_keeps_exactly_retention_and_ignores_foreign_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        for day in 1..=10u64 {
            touch(
                dir.path(),
                &format!("backup_202501{day:02}_000000.tar.gz"),
                (11 - day) * 3600,
            );
        }
        touch(dir.path(), "notes.txt", 999_999);
        touch(dir.path(), "backup_20240101_000000.tar.gz.partial", 999_999);

        let report = prune(dir.path(), 7).expect("prune");
        assert_eq!(report.kept, 7);
        assert_eq!(report.pruned.len(), 3);

        let left = list_archives(dir.path()).expect("list");
        assert_eq!(left.len(), 7);
        assert_eq!(left[0].stamp, "20250110_000000");
        assert_eq!(left[6].stamp, "20250104_000000");
        assert!(dir.path().join("notes.txt").exists());
        assert!(dir.path().join("backup_20240101_000000.tar.gz.partial").exists());
    }

    #[test]
    fn prune_under_retention_deletes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "backup_20250101_000000.tar.gz", 0);
        let report = prune(dir.path(), 7).expect("prune");
        assert_eq!(report.kept, 1);
        assert!(report.pruned.is_empty());
    }

    #[test]
    fn future_dated_archives_do_not_push_out_the_new_one() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ahead = SystemTime::now() + Duration::from_secs(86_400);
        for day in 1..=3u64 {
            File::create(dir.path().join(format!("backup_202601{day:02}_000000.tar.gz")))
                .and_then(|f| f.set_modified(ahead + Duration::from_secs(day)))
                .expect("create");
        }
        let newest = touch(dir.path(), "backup_20251115_020000.tar.gz", 0);

        let report = prune_keeping(dir.path(), 2, &newest).expect("prune");
        assert_eq!(report.kept, 2);
        assert_eq!(report.pruned.len(), 2);
        assert!(newest.exists());

        let left = list_archives(dir.path()).expect("list");
        assert_eq!(
            names(&left),
            vec![
                "backup_20260103_000000.tar.gz",
                "backup_20251115_020000.tar.gz",
            ]
        );
    }

    #[test]
    fn plain_prune_ranks_only_by_mtime() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "backup_20250101_000000.tar.gz", 10);
        let older = touch(dir.path(), "backup_20250201_000000.tar.gz", 100);

        let report = prune(dir.path(), 1).expect("prune");
        assert_eq!(report.pruned, vec![older]);
    }

    #[test]
    fn missing_root_lists_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let archives = list_archives(&dir.path().join("absent")).expect("list");
        assert!(archives.is_empty());
    }
}
