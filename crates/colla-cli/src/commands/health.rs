use anyhow::Context;
use colla_config::OpsConfig;
use colla_health::HealthJob;

use crate::cli::GlobalFlags;
use crate::output::output;
use crate::progress::Progress;

/// Handle `colla health`.
pub async fn handle(config: &OpsConfig, flags: &GlobalFlags) -> anyhow::Result<i32> {
    let job = HealthJob::from_config(&config.health);
    let spinner = Progress::spinner("Checking services");

    let report = tokio::task::spawn_blocking(move || job.run())
        .await
        .context("health task panicked")?;
    spinner.finish_clear();

    if report.mutated() {
        tracing::info!("health run issued start commands");
    }

    output(&report, flags.format)?;
    Ok(report.exit_code())
}
