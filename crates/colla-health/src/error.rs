use colla_core::CommandError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HealthError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("unexpected output from {program}: {detail}")]
    UnexpectedOutput { program: String, detail: String },
}
