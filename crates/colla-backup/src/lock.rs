use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::BackupError;

const LOCK_FILE: &str = ".backup.lock";
/// Only the holder of this file may clear a stale lock.
const TAKEOVER_FILE: &str = ".backup.lock.takeover";

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(0);

/// Held for the whole backup run; removes its own lock file on drop.
///
/// The lock file holds `<pid> <token>`. The token tells apart two holders in
/// the same process and a lock that was replaced after a takeover.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
    owner: String,
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if read_contents(&self.path).is_some_and(|owner| owner == self.owner) {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

impl RunLock {
    /// Take the backup lock under `root`, clearing a lock left by a dead process.
    ///
    /// Never waits: a live holder, or another run clearing the same stale
    /// lock, is an immediate `BackupError::Locked`.
    ///
    /// # Errors
    ///
    /// Returns `BackupError::Locked` or `BackupError::LockUnreadable`.
    pub fn acquire(root: &Path) -> Result<Self, BackupError> {
        let path = root.join(LOCK_FILE);
        let owner = new_owner();
        match try_acquire(&path, &owner) {
            Ok(lock) => Ok(lock),
            Err(LockState::Stale { pid, contents }) => {
                take_over(root, &path, &owner, pid, &contents)
            }
            Err(state) => Err(state.into_error(&path)),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug)]
enum LockState {
    HeldBy(i32),
    Stale { pid: i32, contents: String },
    Unknown,
}

impl LockState {
    fn into_error(self, path: &Path) -> BackupError {
        match self {
            Self::HeldBy(pid) | Self::Stale { pid, .. } => BackupError::Locked {
                pid,
                path: path.to_path_buf(),
            },
            Self::Unknown => BackupError::LockUnreadable {
                path: path.to_path_buf(),
            },
        }
    }
}

/// Clear a dead holder's lock while holding the takeover file, then retry.
///
/// The lock is removed only if it still has the contents that were judged
/// stale, so a run that already replaced it keeps its lock.
fn take_over(
    root: &Path,
    path: &Path,
    owner: &str,
    stale_pid: i32,
    stale_contents: &str,
) -> Result<RunLock, BackupError> {
    let takeover_path = root.join(TAKEOVER_FILE);
    let takeover = match try_acquire(&takeover_path, owner) {
        Ok(guard) => guard,
        Err(LockState::HeldBy(pid)) => {
            return Err(BackupError::Locked {
                pid,
                path: path.to_path_buf(),
            });
        }
        // a takeover file from a dead process needs an operator
        Err(_) => {
            return Err(BackupError::LockUnreadable {
                path: takeover_path,
            });
        }
    };

    if read_contents(path).as_deref() == Some(stale_contents) {
        tracing::warn!(pid = stale_pid, lock = %path.display(), "removing stale backup lock");
        let _ = std::fs::remove_file(path);
    }
    let result = try_acquire(path, owner).map_err(|state| state.into_error(path));
    drop(takeover);
    result
}

fn try_acquire(lock_path: &Path, owner: &str) -> Result<RunLock, LockState> {
    match OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(lock_path)
    {
        Ok(mut file) => {
            let _ = writeln!(file, "{owner}");
            let _ = file.sync_all();
            Ok(RunLock {
                path: lock_path.to_path_buf(),
                owner: owner.to_string(),
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            let Some(contents) = read_contents(lock_path) else {
                return Err(LockState::Unknown);
            };

            let pid = contents
                .split_whitespace()
                .next()
                .and_then(|pid| pid.parse::<i32>().ok());
            match pid {
                Some(pid) if is_process_running(pid) => Err(LockState::HeldBy(pid)),
                Some(pid) => Err(LockState::Stale { pid, contents }),
                None => Err(LockState::Unknown),
            }
        }
        Err(_) => Err(LockState::Unknown),
    }
}

fn read_contents(path: &Path) -> Option<String> {
    let mut buf = String::new();
    OpenOptions::new()
        .read(true)
        .open(path)
        .and_then(|mut file| file.read_to_string(&mut buf))
        .ok()?;
    Some(buf.trim().to_string())
}

/// `<pid> <token>`, unique per acquisition attempt.
fn new_owner() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let seq = NEXT_TOKEN.fetch_add(1, Ordering::Relaxed);
    format!("{} {nanos:x}-{seq}", std::process::id())
}

fn is_process_running(pid: i32) -> bool {
    if pid <= 0 {
        return false;
    }
    std::process::Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
