use std::path::Path;

use anyhow::Result;

use crate::domain::entities::table::SheetTable;

/// Source of parsed sheets for one workbook file.
pub trait WorkbookReader: Send + Sync {
    /// Every sheet of the workbook in workbook order. The first row of each
    /// sheet is its header.
    fn read_tables(&self, path: &Path) -> Result<Vec<SheetTable>>;
}
