//! Spreadsheet folder to T-SQL database script converter.
//!
//! Every Excel workbook in a folder becomes one table: header cells become
//! columns (Cyrillic names spelled out in Latin), data rows become `INSERT`
//! statements, and the whole run is written to `database_creation.sql` next
//! to the workbooks.

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod domain;
pub mod error;
pub mod infra;
pub mod platform;
pub mod usecase;

pub use domain::column_kind::{infer_sql_type, render_value, ColumnKind};
pub use domain::entities::run::{
    ConversionReport, ConvertOptions, ErrorPolicy, EscapePolicy, FileFailure, LineEnding,
    RunContext, TableNaming, TableSummary,
};
pub use domain::entities::table::{Cell, SheetTable};
pub use domain::naming::{resolve_column_identifier, transliterate};
pub use error::{ConvertError, ConvertResult};
pub use infra::import::xlsx::CalamineReader;
pub use infra::sql::script::ScriptWriter;
pub use usecase::ports::reader::WorkbookReader;
pub use usecase::services::convert_service::ConvertService;

/// Converts every workbook in `folder` with default options and returns the
/// path of the written script.
pub fn convert_folder(folder: &Path) -> ConvertResult<PathBuf> {
    ConvertService::new(Arc::new(CalamineReader)).convert_folder(folder)
}
