//! Writing and verifying `.tar.gz` archives in-process.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path};

use colla_core::responses::ArchiveSummary;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::error::BackupError;

/// Prefix of the env file entry inside an archive.
pub const ENV_ENTRY_PREFIX: &str = "env_";

/// One file or directory to place in an archive.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveEntry<'a> {
    pub source: &'a Path,
    pub name: &'a str,
}

/// Write `entries` into a new gzip-compressed tarball at `dest`.
///
/// Directories are added recursively under their entry name. The file is
/// flushed and synced before returning.
///
/// # Errors
///
/// Returns `BackupError::Io` on any read or write failure.
pub fn write_archive(dest: &Path, entries: &[ArchiveEntry<'_>]) -> Result<u64, BackupError> {
    let file = File::create(dest).map_err(BackupError::io(dest))?;
    let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.follow_symlinks(false);

    for entry in entries {
        let appended = if entry.source.is_dir() {
            builder.append_dir_all(entry.name, entry.source)
        } else {
            builder.append_path_with_name(entry.source, entry.name)
        };
        appended.map_err(BackupError::io(entry.source))?;
    }

    let encoder = builder.into_inner().map_err(BackupError::io(dest))?;
    let mut writer = encoder.finish().map_err(BackupError::io(dest))?;
    writer.flush().map_err(BackupError::io(dest))?;
    let file = writer
        .into_inner()
        .map_err(|e| BackupError::io(dest)(e.into_error()))?;
    file.sync_all().map_err(BackupError::io(dest))?;

    let size = file.metadata().map_err(BackupError::io(dest))?.len();
    tracing::debug!(archive = %dest.display(), size, "archive written");
    Ok(size)
}

/// Read an archive end to end and summarize what it holds.
///
/// Fails if the gzip stream or any tar entry is unreadable, or the archive
/// is empty.
///
/// # Errors
///
/// Returns `BackupError::CorruptArchive` or `BackupError::Io`.
pub fn verify_archive(path: &Path) -> Result<ArchiveSummary, BackupError> {
    let corrupt = |reason: String| BackupError::CorruptArchive {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(BackupError::io(path))?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));

    let mut entries = 0usize;
    let mut has_dump = false;
    let mut has_env = false;

    for entry in archive.entries().map_err(|e| corrupt(e.to_string()))? {
        let mut entry = entry.map_err(|e| corrupt(e.to_string()))?;
        let entry_path = entry.path().map_err(|e| corrupt(e.to_string()))?.into_owned();

        let top = entry_path.components().find_map(|c| match c {
            Component::Normal(name) => name.to_str().map(ToString::to_string),
            _ => None,
        });
        match top {
            Some(name) if name.starts_with(ENV_ENTRY_PREFIX) => has_env = true,
            Some(_) => has_dump = true,
            None => {}
        }

        io::copy(&mut entry, &mut io::sink()).map_err(|e| corrupt(e.to_string()))?;
        entries += 1;
    }

    if entries == 0 {
        return Err(corrupt("archive has no entries".into()));
    }

    Ok(ArchiveSummary {
        path: path.to_path_buf(),
        entries,
        has_dump,
        has_env,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_archive_verifies() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dump = dir.path().join("dump");
        std::fs::create_dir_all(dump.join("collalearn")).expect("mkdir");
        std::fs::write(dump.join("collalearn/files.bson"), b"bson").expect("write");
        let env = dir.path().join(".env");
        std::fs::write(&env, "BOT_TOKEN=1:x\n").expect("write");

        let dest = dir.path().join("out.tar.gz");
        let size = write_archive(
            &dest,
            &[
                ArchiveEntry {
                    source: &dump,
                    name: "20251115_030405",
                },
                ArchiveEntry {
                    source: &env,
                    name: "env_20251115_030405",
                },
            ],
        )
        .expect("archive writes");
        assert!(size > 0);

        let summary = verify_archive(&dest).expect("archive verifies");
        assert!(summary.has_dump);
        assert!(summary.has_env);
        // dir root, collalearn dir, files.bson, env file
        assert!(summary.entries >= 3);
    }

    #[test]
    fn truncated_archive_is_corrupt() {
        let dir = tempfile::tempdir().expect("tempdir");
        let src = dir.path().join("data.txt");
        std::fs::write(&src, "x".repeat(64 * 1024)).expect("write");
        let dest = dir.path().join("out.tar.gz");
        write_archive(
            &dest,
            &[ArchiveEntry {
                source: &src,
                name: "20251115_030405",
            }],
        )
        .expect("archive writes");

        let bytes = std::fs::read(&dest).expect("read");
        std::fs::write(&dest, &bytes[..bytes.len() / 2]).expect("truncate");

        let err = verify_archive(&dest).expect_err("truncated");
        assert!(matches!(err, BackupError::CorruptArchive { .. }));
    }

    #[test]
    fn plain_file_is_not_an_archive() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("fake.tar.gz");
        std::fs::write(&dest, "not gzip").expect("write");
        assert!(verify_archive(&dest).is_err());
    }
}
