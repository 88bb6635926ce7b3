/// A single cell: `None` is an empty or missing cell, `Some` carries its
/// textual form.
pub type Cell = Option<String>;

/// One parsed sheet: header names plus data rows aligned by column position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// A sheet without a header row produces no statements at all.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
