use std::path::PathBuf;

use clap::Subcommand;

/// Backup management.
#[derive(Clone, Debug, Subcommand)]
pub enum BackupCommands {
    /// Dump the database, archive it with the env file, then prune.
    Run,
    /// List archives under the backup root, newest first.
    List,
    /// Delete all but the newest archives.
    Prune {
        /// Archives to keep (defaults to the configured retention).
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        keep: Option<u32>,
    },
    /// Read an archive end to end and summarize its contents.
    Verify {
        /// Archive path, or a file name under the backup root.
        archive: PathBuf,
    },
}
