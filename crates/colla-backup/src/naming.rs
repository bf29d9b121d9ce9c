//! Archive file names: `backup_<YYYYMMDD_HHMMSS>[_<n>].tar.gz`.
//!
//! The sequence suffix only appears when an archive for the same second
//! already exists, so names stay unique under rapid invocation.

use std::path::Path;

use chrono::NaiveDateTime;
use colla_core::CoreError;

use crate::clock::STAMP_FORMAT;
use crate::error::BackupError;

const PREFIX: &str = "backup_";
const SUFFIX: &str = ".tar.gz";
const STAMP_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArchiveName {
    pub stamp: String,
    pub sequence: u32,
}

impl ArchiveName {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `stamp` is not `YYYYMMDD_HHMMSS`.
    pub fn new(stamp: &str, sequence: u32) -> Result<Self, BackupError> {
        if !is_stamp(stamp) {
            return Err(CoreError::Validation(format!("not a backup stamp: {stamp}")).into());
        }
        Ok(Self {
            stamp: stamp.to_string(),
            sequence,
        })
    }

    /// Parse a file name; `None` for anything that is not a finished archive.
    #[must_use]
    pub fn parse(file_name: &str) -> Option<Self> {
        let body = file_name.strip_prefix(PREFIX)?.strip_suffix(SUFFIX)?;
        let stamp = body.get(..STAMP_LEN)?;
        if !is_stamp(stamp) {
            return None;
        }

        let sequence = match &body[STAMP_LEN..] {
            "" => 0,
            rest => {
                let digits = rest.strip_prefix('_')?;
                // one spelling per sequence: no `_0`, no `_01`
                if digits.starts_with('0') || !digits.chars().all(|c| c.is_ascii_digit()) {
                    return None;
                }
                digits.parse().ok()?
            }
        };

        Some(Self {
            stamp: stamp.to_string(),
            sequence,
        })
    }

    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(Self::parse)
    }

    /// Stamp plus sequence suffix; names the staging entries inside the archive.
    #[must_use]
    pub fn label(&self) -> String {
        if self.sequence == 0 {
            self.stamp.clone()
        } else {
            format!("{}_{}", self.stamp, self.sequence)
        }
    }

    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{PREFIX}{}{SUFFIX}", self.label())
    }

    /// The same stamp with the next sequence number.
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            stamp: self.stamp.clone(),
            sequence: self.sequence + 1,
        }
    }
}

fn is_stamp(value: &str) -> bool {
    value.len() == STAMP_LEN && NaiveDateTime::parse_from_str(value, STAMP_FORMAT).is_ok()
}
