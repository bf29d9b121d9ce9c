use std::path::{Path, PathBuf};

use anyhow::Context;
use colla_backup::verify_archive;
use colla_config::OpsConfig;

use crate::cli::GlobalFlags;
use crate::output::output;

pub fn run(archive: &Path, config: &OpsConfig, flags: &GlobalFlags) -> anyhow::Result<i32> {
    let path = resolve_archive(archive, &config.backup.root);
    let summary =
        verify_archive(&path).with_context(|| format!("{} failed verification", path.display()))?;

    output(&summary, flags.format)?;
    Ok(if summary.has_dump { 0 } else { 1 })
}

/// A bare file name that does not exist here is looked up under the backup root.
fn resolve_archive(archive: &Path, root: &Path) -> PathBuf {
    let is_bare_name = archive.parent().is_none_or(|parent| parent.as_os_str().is_empty());
    if is_bare_name && !archive.exists() {
        return root.join(archive);
    }
    archive.to_path_buf()
}
