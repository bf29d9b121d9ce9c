//! Status enums shared by the ops jobs.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! so that JSON output matches the text renderer's vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// CheckStatus
// ---------------------------------------------------------------------------

/// Outcome of a single validation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

impl CheckStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Warn => "warn",
            Self::Fail => "fail",
        }
    }

    /// Whether this status should make the overall run unsuccessful.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Fail)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ServiceState
// ---------------------------------------------------------------------------

/// Service manager state of a unit as observed before any remediation.
///
/// `Unknown` means the status query itself failed; it is never treated as
/// `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceState {
    Active,
    Inactive,
    Unknown,
}

impl ServiceState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ServiceRole
// ---------------------------------------------------------------------------

/// Which part of the deployment a checked unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceRole {
    Bot,
    Database,
}

impl ServiceRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bot => "bot",
            Self::Database => "database",
        }
    }
}

impl fmt::Display for ServiceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_status_serializes_snake_case() {
        let json = serde_json::to_string(&CheckStatus::Warn).expect("serialize");
        assert_eq!(json, "\"warn\"");
        let back: CheckStatus = serde_json::from_str("\"fail\"").expect("deserialize");
        assert_eq!(back, CheckStatus::Fail);
    }

    #[test]
    fn only_fail_is_failure() {
        assert!(!CheckStatus::Pass.is_failure());
        assert!(!CheckStatus::Warn.is_failure());
        assert!(CheckStatus::Fail.is_failure());
    }

    #[test]
    fn display_matches_serde_names() {
        for state in [ServiceState::Active, ServiceState::Inactive, ServiceState::Unknown] {
            let json = serde_json::to_string(&state).expect("serialize");
            assert_eq!(json, format!("\"{state}\""));
        }
        assert_eq!(ServiceRole::Database.to_string(), "database");
    }
}
