//! Running external programs (`mongodump`, `systemctl`, `df`).
//!
//! Every job reaches the outside world through these two helpers so that a
//! failure always carries the program, its arguments, and its stderr.

use std::ffi::OsStr;
use std::process::{Command, Output};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be started at all.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("{command} exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Run `program` with `args` and capture its output, whatever the exit status.
///
/// # Errors
///
/// Returns `CommandError::Spawn` if the process cannot be started.
pub fn run<I, S>(program: &str, args: I) -> Result<Output, CommandError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args);
    tracing::debug!(command = %describe(&command), "running external command");

    command.output().map_err(|source| CommandError::Spawn {
        program: program.to_string(),
        source,
    })
}

/// Like [`run`], but a non-zero exit is an error.
///
/// # Errors
///
/// Returns `CommandError::Spawn` if the process cannot be started and
/// `CommandError::Failed` if it exits unsuccessfully.
pub fn run_checked<I, S>(program: &str, args: I) -> Result<Output, CommandError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args = args
        .into_iter()
        .map(|a| a.as_ref().to_os_string())
        .collect::<Vec<_>>();
    let output = run(program, &args)?;
    if output.status.success() {
        return Ok(output);
    }

    let mut command = Command::new(program);
    command.args(&args);
    Err(CommandError::Failed {
        command: describe(&command),
        status: output
            .status
            .code()
            .map_or_else(|| "signal".to_string(), |code| format!("status {code}")),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn run_captures_stdout() {
        let output = run("sh", ["-c", "echo hello"]).expect("sh runs");
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }

    #[test]
    fn run_checked_reports_status_and_stderr() {
        let err = run_checked("sh", ["-c", "echo boom >&2; exit 3"]).expect_err("must fail");
        match err {
            CommandError::Failed {
                command,
                status,
                stderr,
            } => {
                assert!(command.starts_with("sh -c"));
                assert_eq!(status, "status 3");
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let err = run("colla-definitely-not-installed", ["--version"]).expect_err("missing");
        assert!(matches!(err, CommandError::Spawn { .. }));
    }

    #[test]
    fn non_zero_exit_is_not_an_error_for_run() {
        let output = run("sh", ["-c", "exit 4"]).expect("sh runs");
        assert_eq!(output.status.code(), Some(4));
    }
}
