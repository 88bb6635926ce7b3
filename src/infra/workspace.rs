use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local};
use directories::{BaseDirs, UserDirs};
use tracing::{info, warn};

use crate::domain::entities::run::FileFailure;

pub const WORK_DIR_PREFIX: &str = "ExcelToSQL_";

/// Desktop when the platform has one, otherwise the home directory, otherwise
/// the current directory.
pub fn default_work_root() -> Result<PathBuf> {
    let desktop = UserDirs::new().and_then(|dirs| dirs.desktop_dir().map(Path::to_path_buf));
    if let Some(desktop) = desktop {
        return Ok(desktop);
    }
    if let Some(base) = BaseDirs::new() {
        return Ok(base.home_dir().to_path_buf());
    }
    std::env::current_dir().map_err(|err| anyhow!("unable to resolve a work directory: {err}"))
}

pub fn work_dir_name(now: DateTime<Local>) -> String {
    format!("{WORK_DIR_PREFIX}{}", now.format("%Y%m%d_%H%M%S"))
}

/// Creates `<root>/ExcelToSQL_<yyyyMMdd_HHmmss>` and returns it.
pub fn create_work_dir(root: &Path, now: DateTime<Local>) -> Result<PathBuf> {
    let dir = root.join(work_dir_name(now));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create work dir: {}", dir.display()))?;
    info!(dir = %dir.display(), "work folder ready");
    Ok(dir)
}

/// Outcome of copying user-selected files into a work folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingReport {
    pub staged: Vec<String>,
    pub failures: Vec<FileFailure>,
}

/// Copies `files` into `work_dir`, overwriting files of the same name.
/// A file that cannot be copied is recorded and the rest are still copied.
pub fn stage_files(work_dir: &Path, files: &[PathBuf]) -> Result<StagingReport> {
    std::fs::create_dir_all(work_dir)
        .with_context(|| format!("failed to create work dir: {}", work_dir.display()))?;

    let mut report = StagingReport::default();
    for source in files {
        match stage_file(work_dir, source) {
            Ok(file_name) => {
                info!(file = %file_name, "staged file");
                report.staged.push(file_name);
            }
            Err(err) => {
                let file_name = source
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| source.display().to_string());
                let message = format!("{err:#}");
                warn!(file = %file_name, error = %message, "failed to stage file");
                report.failures.push(FileFailure { file_name, message });
            }
        }
    }

    Ok(report)
}

fn stage_file(work_dir: &Path, source: &Path) -> Result<String> {
    if !source.is_file() {
        anyhow::bail!("file not found: {}", source.display());
    }
    let file_name = source
        .file_name()
        .ok_or_else(|| anyhow!("not a file path: {}", source.display()))?;
    let dest = work_dir.join(file_name);
    std::fs::copy(source, &dest).with_context(|| {
        format!("failed to copy {} to {}", source.display(), dest.display())
    })?;
    Ok(file_name.to_string_lossy().into_owned())
}
