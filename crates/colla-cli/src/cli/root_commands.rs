use clap::Subcommand;

use crate::cli::subcommands::{AiCommands, BackupCommands, EnvCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Database and env-file snapshots.
    Backup {
        #[command(subcommand)]
        action: BackupCommands,
    },
    /// Check the bot and database units, restart what is down, report disk usage.
    Health,
    /// Bot environment file.
    Env {
        #[command(subcommand)]
        action: EnvCommands,
    },
    /// AI completion endpoint.
    Ai {
        #[command(subcommand)]
        action: AiCommands,
    },
}
