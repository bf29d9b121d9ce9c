mod list;
mod prune;
mod run;
mod verify;

use colla_config::OpsConfig;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::BackupCommands;

/// Handle `colla backup`.
pub async fn handle(
    action: &BackupCommands,
    config: &OpsConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<i32> {
    match action {
        BackupCommands::Run => run::run(config, flags).await,
        BackupCommands::List => list::run(config, flags),
        BackupCommands::Prune { keep } => prune::run(*keep, config, flags),
        BackupCommands::Verify { archive } => verify::run(archive, config, flags),
    }
}
