use anyhow::Context;
use colla_backup::{RunLock, prune};
use colla_config::OpsConfig;
use colla_core::responses::PruneReport;

use crate::cli::GlobalFlags;
use crate::output::output;

pub fn run(keep: Option<u32>, config: &OpsConfig, flags: &GlobalFlags) -> anyhow::Result<i32> {
    let retention = match keep {
        Some(keep) => usize::try_from(keep)?,
        None => config.backup.retention,
    };
    let root = &config.backup.root;

    if !root.is_dir() {
        let report = PruneReport {
            retention,
            kept: 0,
            pruned: Vec::new(),
        };
        output(&report, flags.format)?;
        return Ok(0);
    }

    // a run in progress has an unverified archive; never prune under it
    let _lock = RunLock::acquire(root)
        .with_context(|| format!("cannot prune {} while a backup is running", root.display()))?;
    let report = prune(root, retention)?;

    output(&report, flags.format)?;
    Ok(0)
}
