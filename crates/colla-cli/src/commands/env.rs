use anyhow::Context;
use colla_config::{BotEnv, OpsConfig};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EnvCommands;
use crate::output::output;

/// Handle `colla env`.
pub fn handle(action: &EnvCommands, config: &OpsConfig, flags: &GlobalFlags) -> anyhow::Result<i32> {
    match action {
        EnvCommands::Check { file } => {
            let path = file.as_deref().unwrap_or(&config.backup.env_file);
            let env = BotEnv::from_file(path)
                .with_context(|| format!("cannot read bot env file {}", path.display()))?;

            let report = env.check();
            output(&report, flags.format)?;
            Ok(if report.ok { 0 } else { 1 })
        }
    }
}
