use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Local;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use xls2sql::infra::workspace::{create_work_dir, default_work_root, stage_files};
use xls2sql::platform::desktop::open::open_folder;
use xls2sql::{CalamineReader, ConvertService};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let inputs: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();

    match run(inputs) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            #[cfg(feature = "desktop")]
            xls2sql::platform::desktop::dialogs::show_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(inputs: Vec<PathBuf>) -> Result<()> {
    let folder = match inputs.as_slice() {
        [single] if single.is_dir() => single.clone(),
        [] => {
            let Some(files) = pick_inputs() else {
                bail!("usage: xls2sql <folder> | xls2sql <file.xlsx>...");
            };
            stage_into_work_dir(&files)?
        }
        files => stage_into_work_dir(files)?,
    };

    let service = ConvertService::new(Arc::new(CalamineReader));
    let script_path = service.convert_folder(&folder)?;
    println!("{}", script_path.display());

    if offer_open(&script_path) {
        open_folder(&folder)?;
    }
    Ok(())
}

fn stage_into_work_dir(files: &[PathBuf]) -> Result<PathBuf> {
    let work_dir = create_work_dir(&default_work_root()?, Local::now())?;
    let report = stage_files(&work_dir, files)?;
    for failure in &report.failures {
        warn!("skipped {}: {}", failure.file_name, failure.message);
    }
    if report.staged.is_empty() {
        bail!("none of the selected files could be copied into {}", work_dir.display());
    }
    Ok(work_dir)
}

#[cfg(feature = "desktop")]
fn pick_inputs() -> Option<Vec<PathBuf>> {
    xls2sql::platform::desktop::dialogs::pick_workbooks().filter(|files| !files.is_empty())
}

#[cfg(not(feature = "desktop"))]
fn pick_inputs() -> Option<Vec<PathBuf>> {
    None
}

#[cfg(feature = "desktop")]
fn offer_open(script_path: &Path) -> bool {
    xls2sql::platform::desktop::dialogs::confirm_open_output(script_path)
}

#[cfg(not(feature = "desktop"))]
fn offer_open(_script_path: &Path) -> bool {
    false
}
