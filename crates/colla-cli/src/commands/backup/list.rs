use colla_backup::list_archives;
use colla_config::OpsConfig;
use colla_core::responses::ArchiveInfo;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::{Report, output, text::human_size};

#[derive(Debug, Serialize)]
struct ArchiveListResponse {
    archives: Vec<ArchiveInfo>,
}

impl Report for ArchiveListResponse {
    fn lines(&self) -> Vec<String> {
        if self.archives.is_empty() {
            return vec!["no backups yet".into()];
        }
        self.archives
            .iter()
            .map(|archive| {
                format!(
                    "{}  {:>10}  {}",
                    archive.modified.format("%Y-%m-%d %H:%M:%S"),
                    human_size(archive.size_bytes),
                    archive.path.display()
                )
            })
            .collect()
    }
}

pub fn run(config: &OpsConfig, flags: &GlobalFlags) -> anyhow::Result<i32> {
    let archives = list_archives(&config.backup.root)?;
    output(&ArchiveListResponse { archives }, flags.format)?;
    Ok(0)
}
