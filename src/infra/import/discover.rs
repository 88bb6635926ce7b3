use std::path::{Path, PathBuf};

use tracing::warn;

/// Whether `path` names an Excel workbook (`*.xls*`, any case).
pub fn is_spreadsheet_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase().starts_with("xls"))
        .unwrap_or(false)
}

/// Office keeps `~$name.xlsx` owner files next to open workbooks.
fn is_lock_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with("~$"))
        .unwrap_or(false)
}

/// Spreadsheet files directly inside `folder`, sorted by file name.
pub fn find_spreadsheets(folder: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if !path.is_file() || !is_spreadsheet_path(&path) {
            continue;
        }
        if is_lock_file(&path) {
            warn!(file = %path.display(), "skipping office lock file");
            continue;
        }
        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
