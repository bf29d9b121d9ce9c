use anyhow::Context;
use colla_backup::BackupJob;
use colla_config::OpsConfig;

use crate::cli::GlobalFlags;
use crate::output::output;
use crate::progress::Progress;

pub async fn run(config: &OpsConfig, flags: &GlobalFlags) -> anyhow::Result<i32> {
    let job = BackupJob::from_config(config);
    let spinner = Progress::spinner(&format!("Backing up {}", config.database.name));

    let result = tokio::task::spawn_blocking(move || job.run())
        .await
        .context("backup task panicked")?;

    let report = match result {
        Ok(report) => {
            spinner.finish_clear();
            report
        }
        Err(error) => {
            spinner.finish_err("backup failed");
            return Err(error).with_context(|| {
                format!("backup into {} failed", config.backup.root.display())
            });
        }
    };

    tracing::info!(archive = %report.archive.display(), pruned = report.pruned.len(), "backup finished");
    output(&report, flags.format)?;
    Ok(0)
}
