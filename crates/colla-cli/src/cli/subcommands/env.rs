use std::path::PathBuf;

use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum EnvCommands {
    /// Validate the variables the bot needs at startup.
    Check {
        /// Env file to check (defaults to `backup.env_file`).
        #[arg(long)]
        file: Option<PathBuf>,
    },
}
