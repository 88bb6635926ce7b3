use crate::domain::column_kind::ColumnKind;
use crate::domain::entities::run::{ConvertOptions, EscapePolicy, RunContext};
use crate::domain::entities::table::SheetTable;
use crate::domain::naming::resolve_column_identifiers;

const BATCH_TERMINATOR: &str = "GO";
const COLLATION: &str = "Cyrillic_General_CI_AS";
const BANNER: &str = "=============================================";

/// Append-only T-SQL script buffer.
///
/// Every statement batch ends with `GO`, the SQL Server client batch
/// separator. Lines are terminated with the configured line ending.
#[derive(Debug, Clone)]
pub struct ScriptWriter {
    buf: String,
    newline: &'static str,
    escape: EscapePolicy,
    dedupe_columns: bool,
}

impl ScriptWriter {
    pub fn new(options: &ConvertOptions) -> Self {
        Self {
            buf: String::new(),
            newline: options.line_ending.as_str(),
            escape: options.escape,
            dedupe_columns: options.dedupe_columns,
        }
    }

    fn line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push_str(self.newline);
    }

    fn blank(&mut self) {
        self.buf.push_str(self.newline);
    }

    fn go(&mut self) {
        self.line(BATCH_TERMINATOR);
    }

    /// Banner comment, then drop-if-exists and create of the run database.
    pub fn write_header(&mut self, ctx: &RunContext) {
        let db = ctx.database_name.as_str();

        self.line(&format!("/* {BANNER}"));
        self.line(&format!("   Database: {db}"));
        self.line(&format!(
            "   Created: {}",
            ctx.created_at.format("%Y-%m-%d %H:%M:%S")
        ));
        self.line(&format!("   User: {}", ctx.user));
        self.line(&format!("   {BANNER} */"));
        self.blank();

        self.line("USE [master]");
        self.go();
        self.blank();

        self.line(&format!(
            "IF EXISTS (SELECT name FROM sys.databases WHERE name = N'{db}')"
        ));
        self.line("BEGIN");
        self.line(&format!(
            "    ALTER DATABASE [{db}] SET SINGLE_USER WITH ROLLBACK IMMEDIATE;"
        ));
        self.line(&format!("    DROP DATABASE [{db}];"));
        self.line("END");
        self.go();
        self.blank();

        self.line(&format!("CREATE DATABASE [{db}]"));
        self.line(&format!("    COLLATE {COLLATION}"));
        self.go();
        self.blank();

        self.line(&format!("USE [{db}]"));
        self.go();
        self.blank();
    }

    /// Guarded drop followed by `CREATE TABLE` with an identity `Id` column
    /// and one nullable column per header cell.
    pub fn emit_create_table(&mut self, table: &SheetTable, table_name: &str) {
        self.line(&format!("-- Создание таблицы {table_name}"));
        self.line(&format!(
            "IF OBJECT_ID(N'[dbo].[{table_name}]', N'U') IS NOT NULL"
        ));
        self.line(&format!("    DROP TABLE [dbo].[{table_name}]"));
        self.go();
        self.blank();

        self.line(&format!("CREATE TABLE [dbo].[{table_name}] ("));
        self.line("    [Id] INT IDENTITY(1,1) PRIMARY KEY");

        let identifiers = resolve_column_identifiers(&table.columns, self.dedupe_columns);
        for (original, identifier) in table.columns.iter().zip(&identifiers) {
            let sql_type = ColumnKind::from_column_name(original).sql_type();
            self.line(&format!(
                "    ,[{identifier}] {sql_type} NULL -- {}",
                single_line(original)
            ));
        }

        self.line(")");
        self.go();
        self.blank();
    }

    /// One `INSERT` batch per data row, then a separating blank line.
    pub fn emit_inserts(&mut self, table: &SheetTable, table_name: &str) {
        let identifiers = resolve_column_identifiers(&table.columns, self.dedupe_columns);
        let column_list = format!("([{}])", identifiers.join("], ["));
        let kinds: Vec<ColumnKind> = table
            .columns
            .iter()
            .map(|name| ColumnKind::from_column_name(name))
            .collect();

        for row in &table.rows {
            let mut values = String::new();
            for (idx, kind) in kinds.iter().enumerate() {
                if idx > 0 {
                    values.push_str(", ");
                }
                let cell = row.get(idx).cloned().flatten();
                values.push_str(&kind.render(&cell, self.escape));
            }

            self.line(&format!("INSERT INTO [dbo].[{table_name}]"));
            self.line(&column_list);
            self.line(&format!("VALUES ({values})"));
            self.go();
        }
        self.blank();
    }

    /// DDL then DML for one table. Tables without a header are skipped.
    pub fn emit_table(&mut self, table: &SheetTable, table_name: &str) -> bool {
        if table.is_empty() {
            return false;
        }
        self.emit_create_table(table, table_name);
        self.emit_inserts(table, table_name);
        true
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}
