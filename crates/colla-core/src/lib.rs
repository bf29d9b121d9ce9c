//! # colla-core
//!
//! Shared types for the CollaLearn operations tooling.
//!
//! This crate provides what every job crate and the `colla` binary agree on:
//! - Status enums for checks, services, and service roles
//! - Report structs produced by the backup, health, and env-check jobs
//! - The cross-cutting `CoreError`
//! - A checked wrapper for running external programs

pub mod command;
pub mod enums;
pub mod errors;
pub mod responses;

pub use command::CommandError;
pub use enums::{CheckStatus, ServiceRole, ServiceState};
pub use errors::CoreError;
