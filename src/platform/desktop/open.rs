use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

#[cfg(target_os = "windows")]
const FILE_BROWSER: &str = "explorer";
#[cfg(target_os = "macos")]
const FILE_BROWSER: &str = "open";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const FILE_BROWSER: &str = "xdg-open";

/// Opens `dir` in the platform file browser without waiting for it.
pub fn open_folder(dir: &Path) -> Result<()> {
    Command::new(FILE_BROWSER)
        .arg(dir)
        .spawn()
        .with_context(|| format!("failed to open folder: {}", dir.display()))?;
    Ok(())
}
