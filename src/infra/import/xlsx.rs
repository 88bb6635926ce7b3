use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use tracing::debug;

use crate::domain::entities::table::{Cell, SheetTable};
use crate::usecase::ports::reader::WorkbookReader;

/// Calendar text for a serial date; the raw serial only when it is out of range.
pub fn excel_datetime_to_string(value: &ExcelDateTime) -> String {
    value
        .as_datetime()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| value.to_string())
}

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => excel_datetime_to_string(v),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

pub fn cell_value(cell: &Data) -> Cell {
    match cell {
        Data::Empty => None,
        other => Some(cell_to_string(other)),
    }
}

/// Splits a worksheet range into a header row and data rows. Data rows are
/// padded or cut to the header width.
pub fn range_to_table(sheet_name: &str, range: &Range<Data>) -> SheetTable {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return SheetTable::new(sheet_name, Vec::new(), Vec::new());
    };

    let columns: Vec<String> = header.iter().map(cell_to_string).collect();
    let width = columns.len();
    let data = rows
        .map(|row| {
            (0..width)
                .map(|idx| row.get(idx).and_then(cell_value))
                .collect::<Vec<Cell>>()
        })
        .collect();

    SheetTable::new(sheet_name, columns, data)
}

/// Reads xls, xlsx, xlsm, xlsb and ods workbooks through calamine.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalamineReader;

impl WorkbookReader for CalamineReader {
    fn read_tables(&self, path: &Path) -> Result<Vec<SheetTable>> {
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("failed to open workbook: {}", path.display()))?;

        let sheet_names = workbook.sheet_names();
        let mut tables = Vec::with_capacity(sheet_names.len());
        for sheet_name in sheet_names {
            let range = workbook
                .worksheet_range(&sheet_name)
                .with_context(|| format!("failed to read sheet: {sheet_name}"))?;
            let table = range_to_table(&sheet_name, &range);
            debug!(
                sheet = %sheet_name,
                columns = table.columns.len(),
                rows = table.rows.len(),
                "read sheet"
            );
            tables.push(table);
        }

        Ok(tables)
    }
}
