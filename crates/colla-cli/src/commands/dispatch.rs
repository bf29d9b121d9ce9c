use colla_config::OpsConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to its handler. Returns the process exit code.
pub async fn dispatch(
    command: Commands,
    config: &OpsConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<i32> {
    match command {
        Commands::Backup { action } => commands::backup::handle(&action, config, flags).await,
        Commands::Health => commands::health::handle(config, flags).await,
        Commands::Env { action } => commands::env::handle(&action, config, flags),
        Commands::Ai { action } => commands::ai::handle(&action, config, flags).await,
    }
}
