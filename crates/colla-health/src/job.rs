//! One pass over the deployment: both units, then the disk.

use colla_config::HealthConfig;
use colla_core::responses::{DiskCheck, HealthReport, RemediationAction, ServiceCheck};
use colla_core::{ServiceRole, ServiceState};

use crate::disk::{DfProbe, DiskProbe};
use crate::service::{ServiceManager, Systemctl};

pub struct HealthJob<S, P> {
    units: Vec<(ServiceRole, String)>,
    mount: String,
    threshold_percent: u8,
    services: S,
    disk: P,
}

impl HealthJob<Systemctl, DfProbe> {
    #[must_use]
    pub fn from_config(config: &HealthConfig) -> Self {
        Self::new(
            config,
            Systemctl::new(config.systemctl_program.clone()),
            DfProbe::new(config.df_program.clone()),
        )
    }
}

impl<S: ServiceManager, P: DiskProbe> HealthJob<S, P> {
    pub fn new(config: &HealthConfig, services: S, disk: P) -> Self {
        Self {
            units: vec![
                (ServiceRole::Bot, config.bot_unit.clone()),
                (ServiceRole::Database, config.database_unit.clone()),
            ],
            mount: config.mount.clone(),
            threshold_percent: config.disk_threshold_percent,
            services,
            disk,
        }
    }

    /// Check every unit independently, then disk usage.
    ///
    /// Never fails as a whole: each probe's failure is recorded in its own
    /// entry of the report.
    pub fn run(&self) -> HealthReport {
        let services = self
            .units
            .iter()
            .map(|(role, unit)| self.check_service(*role, unit))
            .collect();

        HealthReport {
            services,
            disk: self.check_disk(),
        }
    }

    fn check_service(&self, role: ServiceRole, unit: &str) -> ServiceCheck {
        let check = |state, action| ServiceCheck {
            unit: unit.to_string(),
            role,
            state,
            action,
        };

        match self.services.is_active(unit) {
            Ok(true) => {
                tracing::debug!(unit, "unit is active");
                check(ServiceState::Active, RemediationAction::None)
            }
            Ok(false) => {
                tracing::warn!(unit, "unit is not active; starting it");
                check(ServiceState::Inactive, self.restart(unit))
            }
            Err(error) => {
                tracing::warn!(unit, %error, "could not query unit");
                check(
                    ServiceState::Unknown,
                    RemediationAction::ProbeFailed {
                        error: error.to_string(),
                    },
                )
            }
        }
    }

    fn restart(&self, unit: &str) -> RemediationAction {
        if let Err(error) = self.services.start(unit) {
            tracing::error!(unit, %error, "start failed");
            return RemediationAction::StartFailed {
                error: error.to_string(),
            };
        }

        match self.services.is_active(unit) {
            Ok(true) => RemediationAction::Started,
            Ok(false) => RemediationAction::StartFailed {
                error: "unit is still inactive after start".into(),
            },
            Err(error) => RemediationAction::StartFailed {
                error: format!("could not confirm start: {error}"),
            },
        }
    }

    fn check_disk(&self) -> DiskCheck {
        match self.disk.used_percent(&self.mount) {
            Ok(used) => {
                let over_threshold = used > self.threshold_percent;
                if over_threshold {
                    tracing::warn!(mount = %self.mount, used, threshold = self.threshold_percent, "disk usage over threshold");
                }
                DiskCheck {
                    mount: self.mount.clone(),
                    used_percent: Some(used),
                    threshold_percent: self.threshold_percent,
                    over_threshold,
                    error: None,
                }
            }
            Err(error) => DiskCheck {
                mount: self.mount.clone(),
                used_percent: None,
                threshold_percent: self.threshold_percent,
                over_threshold: false,
                error: Some(error.to_string()),
            },
        }
    }
}
