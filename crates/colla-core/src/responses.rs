//! Report types returned by `colla` commands.
//!
//! Job crates build these; the CLI renders them as text lines, JSON, or a
//! table.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{CheckStatus, ServiceRole, ServiceState};

// ---------------------------------------------------------------------------
// Backup
// ---------------------------------------------------------------------------

/// Result of `colla backup run`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackupReport {
    pub archive: PathBuf,
    pub stamp: String,
    pub size_bytes: u64,
    pub entries: usize,
    pub env_file_included: bool,
    pub stale_staging_removed: Vec<PathBuf>,
    pub pruned: Vec<PathBuf>,
    pub kept: usize,
}

/// One archive found under the backup root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchiveInfo {
    pub path: PathBuf,
    pub stamp: String,
    pub sequence: u32,
    pub size_bytes: u64,
    pub modified: DateTime<Utc>,
}

/// Contents summary of a readable archive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub entries: usize,
    pub has_dump: bool,
    pub has_env: bool,
}

/// Result of a standalone retention pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PruneReport {
    pub retention: usize,
    pub kept: usize,
    pub pruned: Vec<PathBuf>,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// What the health job did about a unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RemediationAction {
    None,
    Started,
    StartFailed { error: String },
    ProbeFailed { error: String },
}

impl RemediationAction {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::StartFailed { .. } | Self::ProbeFailed { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceCheck {
    pub unit: String,
    pub role: ServiceRole,
    pub state: ServiceState,
    #[serde(flatten)]
    pub action: RemediationAction,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiskCheck {
    pub mount: String,
    pub used_percent: Option<u8>,
    pub threshold_percent: u8,
    pub over_threshold: bool,
    pub error: Option<String>,
}

/// Result of `colla health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthReport {
    pub services: Vec<ServiceCheck>,
    pub disk: DiskCheck,
}

impl HealthReport {
    /// Process exit code for the run.
    ///
    /// `0` healthy or remediated, `2` disk warning only, `1` any failed
    /// remediation or probe.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        let failed = self.services.iter().any(|s| s.action.is_failure()) || self.disk.error.is_some();
        if failed {
            1
        } else if self.disk.over_threshold {
            2
        } else {
            0
        }
    }

    /// Whether any start command was issued during the run.
    #[must_use]
    pub fn mutated(&self) -> bool {
        self.services.iter().any(|s| {
            matches!(
                s.action,
                RemediationAction::Started | RemediationAction::StartFailed { .. }
            )
        })
    }

    /// Human-readable status lines, one or two per unit plus disk warnings.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for service in &self.services {
            let unit = &service.unit;
            match &service.action {
                RemediationAction::None => lines.push(format!("✅ {unit} is running")),
                RemediationAction::Started => {
                    lines.push(format!("❌ {unit} is not running. Restarting..."));
                    lines.push(format!("✅ {unit} started"));
                }
                RemediationAction::StartFailed { error } => {
                    lines.push(format!("❌ {unit} is not running. Restarting..."));
                    lines.push(format!("❌ failed to start {unit}: {error}"));
                }
                RemediationAction::ProbeFailed { error } => {
                    lines.push(format!("❓ could not query {unit}: {error}"));
                }
            }
        }

        let disk = &self.disk;
        if let Some(error) = &disk.error {
            lines.push(format!("❓ could not read disk usage for {}: {error}", disk.mount));
        } else if disk.over_threshold {
            lines.push(format!(
                "⚠️ Disk usage is at {}% on {} (threshold {}%)",
                disk.used_percent.unwrap_or_default(),
                disk.mount,
                disk.threshold_percent
            ));
        }
        lines
    }
}

// ---------------------------------------------------------------------------
// Env check
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvCheck {
    pub key: String,
    pub status: CheckStatus,
    pub detail: String,
}

/// Result of `colla env check`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvCheckReport {
    pub path: PathBuf,
    pub ok: bool,
    pub checks: Vec<EnvCheck>,
}

impl EnvCheckReport {
    #[must_use]
    pub fn new(path: PathBuf, checks: Vec<EnvCheck>) -> Self {
        let ok = !checks.iter().any(|c| c.status.is_failure());
        Self { path, ok, checks }
    }
}
