//! Filesystem usage.

use colla_core::command;

use crate::error::HealthError;

pub trait DiskProbe {
    /// Used space of the filesystem holding `mount`, in whole percent.
    ///
    /// # Errors
    ///
    /// Returns `HealthError` when usage cannot be read.
    fn used_percent(&self, mount: &str) -> Result<u8, HealthError>;
}

impl<T: DiskProbe + ?Sized> DiskProbe for &T {
    fn used_percent(&self, mount: &str) -> Result<u8, HealthError> {
        (**self).used_percent(mount)
    }
}

/// POSIX `df -P <mount>`.
#[derive(Debug, Clone)]
pub struct DfProbe {
    program: String,
}

impl DfProbe {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for DfProbe {
    fn default() -> Self {
        Self::new("df")
    }
}

impl DiskProbe for DfProbe {
    fn used_percent(&self, mount: &str) -> Result<u8, HealthError> {
        let output = command::run_checked(&self.program, ["-P", mount])?;
        parse_capacity(&String::from_utf8_lossy(&output.stdout)).map_err(|detail| {
            HealthError::UnexpectedOutput {
                program: self.program.clone(),
                detail,
            }
        })
    }
}

/// Read the capacity column from the last row of `df -P` output.
///
/// # Errors
///
/// Returns a description of what was wrong with the output.
pub fn parse_capacity(output: &str) -> Result<u8, String> {
    let row = output
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .last()
        .ok_or_else(|| "no filesystem row".to_string())?;

    let capacity = row
        .split_whitespace()
        .nth(4)
        .ok_or_else(|| format!("too few columns in '{row}'"))?;

    let percent = capacity
        .strip_suffix('%')
        .ok_or_else(|| format!("capacity '{capacity}' is not a percentage"))?
        .parse::<u8>()
        .map_err(|e| format!("capacity '{capacity}': {e}"))?;

    if percent > 100 {
        return Err(format!("capacity '{capacity}' is over 100%"));
    }
    Ok(percent)
}
