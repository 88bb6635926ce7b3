use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::run::{
    ConversionReport, ConvertOptions, ErrorPolicy, FileFailure, RunContext, TableSummary,
};
use crate::domain::naming::table_name_for;
use crate::error::{ConvertError, ConvertResult};
use crate::infra::import::discover::find_spreadsheets;
use crate::infra::sql::script::ScriptWriter;
use crate::usecase::ports::reader::WorkbookReader;

const UTF8_BOM: &str = "\u{feff}";

/// Script text plus what went into it.
#[derive(Debug, Clone)]
pub struct RenderedScript {
    pub text: String,
    pub tables: Vec<TableSummary>,
    pub failures: Vec<FileFailure>,
}

/// Turns a folder of workbooks into one database creation script.
pub struct ConvertService {
    reader: Arc<dyn WorkbookReader>,
    options: ConvertOptions,
}

impl ConvertService {
    pub fn new(reader: Arc<dyn WorkbookReader>) -> Self {
        Self::with_options(reader, ConvertOptions::default())
    }

    pub fn with_options(reader: Arc<dyn WorkbookReader>, options: ConvertOptions) -> Self {
        Self { reader, options }
    }

    /// Converts every workbook in `folder` and returns the written script path.
    pub fn convert_folder(&self, folder: &Path) -> ConvertResult<PathBuf> {
        self.run(folder, &RunContext::capture())
            .map(|report| report.script_path)
    }

    /// Same as [`convert_folder`](Self::convert_folder) with an explicit run
    /// context, returning the full report.
    pub fn run(&self, folder: &Path, ctx: &RunContext) -> ConvertResult<ConversionReport> {
        let files = find_spreadsheets(folder).map_err(|err| ConvertError::io(folder, err))?;
        if files.is_empty() {
            return Err(ConvertError::NoInputFiles {
                folder: folder.to_path_buf(),
            });
        }

        info!(
            folder = %folder.display(),
            files = files.len(),
            database = %ctx.database_name,
            "converting workbooks"
        );

        let rendered = self.render_script(&files, ctx)?;
        let script_path = folder.join(&self.options.output_file_name);
        self.write_script(&script_path, &rendered.text)?;

        info!(
            script = %script_path.display(),
            tables = rendered.tables.len(),
            failures = rendered.failures.len(),
            "script written"
        );

        Ok(ConversionReport {
            script_path,
            tables: rendered.tables,
            failures: rendered.failures,
        })
    }

    /// Builds the script for `files` in the given order without touching disk.
    pub fn render_script(
        &self,
        files: &[PathBuf],
        ctx: &RunContext,
    ) -> ConvertResult<RenderedScript> {
        let mut writer = ScriptWriter::new(&self.options);
        writer.write_header(ctx);

        let mut tables = Vec::new();
        let mut failures = Vec::new();

        for path in files {
            let file_name = display_file_name(path);
            match self.emit_file(&mut writer, path, &file_name) {
                Ok(mut summaries) => tables.append(&mut summaries),
                Err(err) => match self.options.error_policy {
                    ErrorPolicy::Abort => return Err(err),
                    ErrorPolicy::Continue => {
                        let message = format!("{:#}", anyhow::Error::from(err));
                        warn!(file = %file_name, error = %message, "skipping file");
                        failures.push(FileFailure { file_name, message });
                    }
                },
            }
        }

        Ok(RenderedScript {
            text: writer.into_string(),
            tables,
            failures,
        })
    }

    fn emit_file(
        &self,
        writer: &mut ScriptWriter,
        path: &Path,
        file_name: &str,
    ) -> ConvertResult<Vec<TableSummary>> {
        info!(file = %file_name, "processing workbook");

        let sheets = self
            .reader
            .read_tables(path)
            .map_err(|err| ConvertError::file_processing(file_name, err))?;

        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut summaries = Vec::new();
        for sheet in sheets {
            if sheet.is_empty() {
                warn!(file = %file_name, sheet = %sheet.name, "skipping empty sheet");
                continue;
            }

            let table_name = table_name_for(&stem, summaries.len(), self.options.table_naming);
            debug!(
                file = %file_name,
                sheet = %sheet.name,
                table = %table_name,
                columns = sheet.columns.len(),
                rows = sheet.rows.len(),
                "emitting table"
            );
            writer.emit_table(&sheet, &table_name);
            summaries.push(TableSummary {
                file_name: file_name.to_string(),
                sheet_name: sheet.name.clone(),
                table_name,
                column_count: sheet.columns.len(),
                row_count: sheet.rows.len(),
            });
        }

        Ok(summaries)
    }

    fn write_script(&self, path: &Path, text: &str) -> ConvertResult<()> {
        let mut bytes = Vec::with_capacity(text.len() + UTF8_BOM.len());
        if self.options.write_bom {
            bytes.extend_from_slice(UTF8_BOM.as_bytes());
        }
        bytes.extend_from_slice(text.as_bytes());
        std::fs::write(path, bytes).map_err(|err| ConvertError::io(path, err))
    }
}

fn display_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
