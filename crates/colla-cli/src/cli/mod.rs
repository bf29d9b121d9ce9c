use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `colla` binary.
#[derive(Debug, Parser)]
#[command(
    name = "colla",
    version,
    about = "CollaLearn ops - backups, health checks, and credential probes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: text, json, table, raw
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only in logs, no spinners)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ./colla.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::subcommands::{AiCommands, BackupCommands, EnvCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_format_is_text() {
        let cli = Cli::try_parse_from(["colla", "health"]).expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(matches!(cli.command, Commands::Health));
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "colla",
            "--format",
            "json",
            "--config",
            "/etc/colla.toml",
            "--verbose",
            "health",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/colla.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["colla", "backup", "list", "--format", "table", "-q"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Backup {
                action: BackupCommands::List
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["colla", "--format", "xml", "health"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn backup_prune_takes_optional_keep() {
        let cli = Cli::try_parse_from(["colla", "backup", "prune", "--keep", "3"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Backup {
                action: BackupCommands::Prune { keep: Some(3) }
            }
        ));

        let cli = Cli::try_parse_from(["colla", "backup", "prune"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Backup {
                action: BackupCommands::Prune { keep: None }
            }
        ));
    }

    #[test]
    fn backup_prune_rejects_zero_keep() {
        assert!(Cli::try_parse_from(["colla", "backup", "prune", "--keep", "0"]).is_err());
    }

    #[test]
    fn backup_verify_requires_archive() {
        assert!(Cli::try_parse_from(["colla", "backup", "verify"]).is_err());

        let cli = Cli::try_parse_from(["colla", "backup", "verify", "backup_20251115_020000.tar.gz"])
            .expect("cli should parse");
        match cli.command {
            Commands::Backup {
                action: BackupCommands::Verify { archive },
            } => assert_eq!(archive, Path::new("backup_20251115_020000.tar.gz")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn env_and_ai_accept_file_override() {
        let cli = Cli::try_parse_from(["colla", "env", "check", "--file", "/opt/bot/.env"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Env {
                action: EnvCommands::Check { file: Some(_) }
            }
        ));

        let cli = Cli::try_parse_from(["colla", "ai", "ping"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Ai {
                action: AiCommands::Ping { file: None }
            }
        ));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["colla", "-c", "/tmp/ops.toml", "health"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.config.as_deref(), Some(Path::new("/tmp/ops.toml")));
        assert_eq!(flags.format, OutputFormat::Text);
    }
}
