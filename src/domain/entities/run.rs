use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};

pub const DEFAULT_OUTPUT_FILE_NAME: &str = "database_creation.sql";

/// Values fixed for the duration of one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub database_name: String,
    pub created_at: DateTime<Utc>,
    pub user: String,
}

impl RunContext {
    pub fn new(
        database_name: impl Into<String>,
        created_at: DateTime<Utc>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            database_name: database_name.into(),
            created_at,
            user: user.into(),
        }
    }

    /// Database name from the local clock, creation time from UTC, user from
    /// the login environment.
    pub fn capture() -> Self {
        let database_name = format!("DB_{}", Local::now().format("%Y%m%d_%H%M%S"));
        Self::new(database_name, Utc::now(), current_user())
    }
}

fn current_user() -> String {
    ["USERNAME", "USER", "LOGNAME"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// The first failing file aborts the whole run.
    #[default]
    Abort,
    /// Failing files are recorded in the report and skipped.
    Continue,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EscapePolicy {
    /// Phone and INN literals are emitted without doubling quotes.
    #[default]
    Compatible,
    /// Every quoted literal doubles embedded quotes.
    Uniform,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableNaming {
    /// Every table of a workbook takes the workbook's name.
    #[default]
    Shared,
    /// Second and later tables of a workbook get a `_<n>` suffix.
    Indexed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    CrLf,
    Lf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub error_policy: ErrorPolicy,
    pub escape: EscapePolicy,
    pub table_naming: TableNaming,
    pub dedupe_columns: bool,
    pub line_ending: LineEnding,
    pub write_bom: bool,
    pub output_file_name: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::default(),
            escape: EscapePolicy::default(),
            table_naming: TableNaming::default(),
            dedupe_columns: false,
            line_ending: LineEnding::default(),
            write_bom: true,
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub file_name: String,
    pub sheet_name: String,
    pub table_name: String,
    pub column_count: usize,
    pub row_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_name: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub script_path: PathBuf,
    pub tables: Vec<TableSummary>,
    pub failures: Vec<FileFailure>,
}
