//! Text renderings of the library reports.

use colla_ai::AiProbeReport;
use colla_core::CheckStatus;
use colla_core::responses::{ArchiveSummary, BackupReport, EnvCheckReport, HealthReport, PruneReport};

use super::Report;

impl Report for BackupReport {
    fn lines(&self) -> Vec<String> {
        let mut lines = self
            .stale_staging_removed
            .iter()
            .map(|path| format!("🧹 removed leftover {}", path.display()))
            .collect::<Vec<_>>();

        lines.push(format!(
            "✅ Backup created: {} ({}, {} entries)",
            self.archive.display(),
            human_size(self.size_bytes),
            self.entries
        ));
        if !self.env_file_included {
            lines.push("⚠️ env file was not found and is not in this archive".into());
        }
        lines.extend(
            self.pruned
                .iter()
                .map(|path| format!("🗑️ pruned {}", path.display())),
        );
        lines.push(format!("{} archive(s) kept", self.kept));
        lines
    }
}

impl Report for PruneReport {
    fn lines(&self) -> Vec<String> {
        let mut lines = self
            .pruned
            .iter()
            .map(|path| format!("🗑️ pruned {}", path.display()))
            .collect::<Vec<_>>();
        lines.push(format!(
            "{} archive(s) kept (retention {})",
            self.kept, self.retention
        ));
        lines
    }
}

impl Report for ArchiveSummary {
    fn lines(&self) -> Vec<String> {
        let mark = |present: bool| if present { "yes" } else { "no" };
        vec![
            format!("✅ {} is readable ({} entries)", self.path.display(), self.entries),
            format!("database dump: {}", mark(self.has_dump)),
            format!("env file: {}", mark(self.has_env)),
        ]
    }
}

impl Report for HealthReport {
    fn lines(&self) -> Vec<String> {
        Self::lines(self)
    }
}

impl Report for EnvCheckReport {
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Checking {}", self.path.display())];
        lines.extend(self.checks.iter().map(|check| {
            let icon = match check.status {
                CheckStatus::Pass => "✅",
                CheckStatus::Warn => "⚠️",
                CheckStatus::Fail => "❌",
            };
            format!("{icon} {}: {}", check.key, check.detail)
        }));
        lines.push(if self.ok {
            "env file is usable".into()
        } else {
            "env file has problems; the bot will not start cleanly".into()
        });
        lines
    }
}

impl Report for AiProbeReport {
    fn lines(&self) -> Vec<String> {
        Self::lines(self)
    }
}

/// Bytes as a short binary-prefixed size.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{value:.1} {unit}")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use colla_core::responses::EnvCheck;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn human_size_picks_unit() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.0 KiB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MiB");
    }

    #[test]
    fn backup_lines_mention_pruned_archives() {
        let report = BackupReport {
            archive: PathBuf::from("/b/backup_20251115_020000.tar.gz"),
            stamp: "20251115_020000".into(),
            size_bytes: 2048,
            entries: 4,
            env_file_included: true,
            stale_staging_removed: Vec::new(),
            pruned: vec![PathBuf::from("/b/backup_20251108_020000.tar.gz")],
            kept: 7,
        };
        assert_eq!(
            Report::lines(&report),
            vec![
                "✅ Backup created: /b/backup_20251115_020000.tar.gz (2.0 KiB, 4 entries)",
                "🗑️ pruned /b/backup_20251108_020000.tar.gz",
                "7 archive(s) kept",
            ]
        );
    }

    #[test]
    fn env_lines_flag_failures() {
        let report = EnvCheckReport::new(
            PathBuf::from(".env"),
            vec![EnvCheck {
                key: "BOT_TOKEN".into(),
                status: CheckStatus::Fail,
                detail: "not set".into(),
            }],
        );
        let lines = Report::lines(&report);
        assert_eq!(lines[1], "❌ BOT_TOKEN: not set");
        assert!(lines[2].starts_with("env file has problems"));
    }
}
