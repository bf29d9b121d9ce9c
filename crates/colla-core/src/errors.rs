//! Cross-cutting error types.
//!
//! Job-specific errors (`BackupError`, `HealthError`, `AiError`) live in their
//! own crates. They converge into `anyhow` in `colla-cli`.

use thiserror::Error;

/// Errors that can be raised by any CollaLearn ops crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed validation (names, identifiers, formats).
    #[error("Validation error: {0}")]
    Validation(String),
}
