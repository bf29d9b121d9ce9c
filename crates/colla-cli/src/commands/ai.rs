use anyhow::Context;
use colla_ai::AiProbe;
use colla_config::{BotEnv, OpsConfig};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AiCommands;
use crate::output::output;
use crate::progress::Progress;

/// Handle `colla ai`.
pub async fn handle(
    action: &AiCommands,
    config: &OpsConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<i32> {
    match action {
        AiCommands::Ping { file } => {
            let path = file.as_deref().unwrap_or(&config.backup.env_file);
            let env = BotEnv::from_file(path)
                .with_context(|| format!("cannot read bot env file {}", path.display()))?;

            let model = env.model_or(&config.ai.model);
            let probe = AiProbe::new(&config.ai, model).context("failed to build AI probe")?;

            let spinner = Progress::spinner(&format!("Probing {model}"));
            let report = probe.ping(env.api_key()).await;
            spinner.finish_clear();

            output(&report, flags.format)?;
            Ok(if report.outcome.is_ok() { 0 } else { 1 })
        }
    }
}
