//! # colla-backup
//!
//! Snapshots of the CollaLearn database and bot env file.
//!
//! A run dumps the database with the configured export utility into a
//! staging directory, adds a copy of the bot `.env`, writes
//! `backup_<YYYYMMDD_HHMMSS>.tar.gz` under the backup root, reads it back,
//! and only then prunes older archives down to the retention count.
//!
//! External effects sit behind [`DumpTool`] and [`Clock`] so runs can be
//! exercised against a scratch directory.

mod archive;
mod clock;
mod dump;
mod error;
mod job;
mod lock;
mod naming;
mod retention;

pub use archive::{ArchiveEntry, ENV_ENTRY_PREFIX, verify_archive, write_archive};
pub use clock::{Clock, STAMP_FORMAT, SystemClock};
pub use dump::{DumpTool, MongoDump};
pub use error::BackupError;
pub use job::BackupJob;
pub use lock::RunLock;
pub use naming::ArchiveName;
pub use retention::{list_archives, prune, prune_keeping};
