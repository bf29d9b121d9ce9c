use std::path::PathBuf;

use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum AiCommands {
    /// Send one tiny completion with the bot's key and classify the answer.
    Ping {
        /// Env file holding the key (defaults to `backup.env_file`).
        #[arg(long)]
        file: Option<PathBuf>,
    },
}
