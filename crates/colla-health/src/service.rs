//! Service manager access.

use colla_core::command;

use crate::error::HealthError;

pub trait ServiceManager {
    /// Whether `unit` is currently running.
    ///
    /// # Errors
    ///
    /// Returns `HealthError` when the state cannot be determined.
    fn is_active(&self, unit: &str) -> Result<bool, HealthError>;

    /// Ask the service manager to start `unit`.
    ///
    /// # Errors
    ///
    /// Returns `HealthError` when the start request is rejected.
    fn start(&self, unit: &str) -> Result<(), HealthError>;
}

impl<T: ServiceManager + ?Sized> ServiceManager for &T {
    fn is_active(&self, unit: &str) -> Result<bool, HealthError> {
        (**self).is_active(unit)
    }

    fn start(&self, unit: &str) -> Result<(), HealthError> {
        (**self).start(unit)
    }
}

/// systemd through the `systemctl` binary.
#[derive(Debug, Clone)]
pub struct Systemctl {
    program: String,
}

impl Systemctl {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Systemctl {
    fn default() -> Self {
        Self::new("systemctl")
    }
}

impl ServiceManager for Systemctl {
    /// Any non-zero exit from `is-active` counts as not running; only a
    /// failure to run `systemctl` or a signal death is an error.
    fn is_active(&self, unit: &str) -> Result<bool, HealthError> {
        let output = command::run(&self.program, ["is-active", "--quiet", unit])?;
        match output.status.code() {
            Some(code) => Ok(code == 0),
            None => Err(HealthError::UnexpectedOutput {
                program: self.program.clone(),
                detail: format!("is-active {unit} was killed by a signal"),
            }),
        }
    }

    fn start(&self, unit: &str) -> Result<(), HealthError> {
        tracing::info!(unit, "starting unit");
        command::run_checked(&self.program, ["start", unit])?;
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn exit_zero_is_active() {
        let manager = Systemctl::new("true");
        assert!(manager.is_active("collalearn").expect("true exits 0"));
        manager.start("collalearn").expect("true exits 0");
    }

    #[test]
    fn missing_binary_is_an_error_not_inactive() {
        let manager = Systemctl::new("colla-no-such-systemctl");
        assert!(manager.is_active("collalearn").is_err());
    }

    #[test]
    fn non_zero_exit_is_inactive() {
        let manager = Systemctl::new("false");
        assert!(!manager.is_active("collalearn").expect("false runs"));
        assert!(manager.start("collalearn").is_err());
    }
}
