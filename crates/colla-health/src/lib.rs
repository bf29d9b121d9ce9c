//! # colla-health
//!
//! Liveness checks for the CollaLearn deployment.
//!
//! Each run queries the bot unit and the database unit, starts whichever is
//! not running, and reads usage of the configured mount. Disk pressure is
//! only reported; nothing is cleaned up.
//!
//! The service manager and the disk are reached through [`ServiceManager`]
//! and [`DiskProbe`]; [`Systemctl`] and [`DfProbe`] are the production
//! implementations.

mod disk;
mod error;
mod job;
mod service;

pub use disk::{DfProbe, DiskProbe, parse_capacity};
pub use error::HealthError;
pub use job::HealthJob;
pub use service::{ServiceManager, Systemctl};
