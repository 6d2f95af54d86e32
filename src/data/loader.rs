use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use log::{error, info};

use super::database::load_database;
use super::model::{CellValue, TabularData};
use super::source::{SourceKind, SourceParameters};
use crate::config::{AppContext, CsvConfig};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Turns a chosen source and its parameters into a [`TabularData`].
pub struct SourceLoader<'ctx> {
    ctx: &'ctx AppContext,
}

impl<'ctx> SourceLoader<'ctx> {
    pub fn new(ctx: &'ctx AppContext) -> Self {
        Self { ctx }
    }

    /// Load the whole source into memory. Consumes the parameters, so any
    /// credentials are gone once this returns.
    pub fn load(&self, kind: SourceKind, params: SourceParameters) -> Result<TabularData, LoadError> {
        let result = match (kind, params) {
            (SourceKind::DelimitedFile | SourceKind::Spreadsheet, SourceParameters::File { path }) => {
                self.load_file(kind, &path)
            }
            (
                SourceKind::LocalDatabase
                | SourceKind::MySqlDatabase
                | SourceKind::PostgresDatabase,
                SourceParameters::Database(db),
            ) => load_database(&self.ctx.drivers, kind, db),
            (kind, SourceParameters::File { path }) => Err(LoadError::UnsupportedSource(format!(
                "{kind} cannot be read from file {}",
                path.display()
            ))),
            (kind, SourceParameters::Database(_)) => Err(LoadError::UnsupportedSource(format!(
                "{kind} cannot be read from a database connection"
            ))),
        };

        if let Err(e) = &result {
            error!("Failed to load {kind} source: {e}");
        }
        result
    }

    fn load_file(&self, kind: SourceKind, path: &Path) -> Result<TabularData, LoadError> {
        let table = match file_format(kind, path)? {
            FileFormat::Delimited => load_delimited(path, &self.ctx.config.csv)?,
            FileFormat::Workbook => load_workbook(path)?,
        };
        info!(
            "Loaded {} rows x {} columns from {}",
            table.row_count(),
            table.column_count(),
            path.display()
        );
        Ok(table)
    }
}

// ---------------------------------------------------------------------------
// Parser selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Delimited text, columns from the first record.
    Delimited,
    /// `.xls` / `.xlsx`, first sheet.
    Workbook,
}

/// Pick the parser for `path` by extension (case-insensitive).
pub fn file_format(kind: SourceKind, path: &Path) -> Result<FileFormat, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match (kind, ext.as_str()) {
        (SourceKind::DelimitedFile | SourceKind::Spreadsheet, "csv") => Ok(FileFormat::Delimited),
        (SourceKind::Spreadsheet, "xls" | "xlsx") => Ok(FileFormat::Workbook),
        (_, other) => Err(LoadError::UnsupportedSource(format!(
            "Unsupported file extension for {kind}: .{other}"
        ))),
    }
}

/// Blank header cells are named after their position.
fn header_name(idx: usize, raw: String) -> String {
    if raw.is_empty() {
        format!("Unnamed: {idx}")
    } else {
        raw
    }
}

// ---------------------------------------------------------------------------
// Delimited text
// ---------------------------------------------------------------------------

fn load_delimited(path: &Path, cfg: &CsvConfig) -> Result<TabularData, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(cfg.delimiter_byte())
        .has_headers(true)
        .trim(if cfg.trim { csv::Trim::All } else { csv::Trim::None })
        .from_path(path)?;

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, h)| header_name(idx, h.to_string()))
        .collect();
    if columns.is_empty() {
        return Err(LoadError::ParseFailed(format!(
            "{} has no header record",
            path.display()
        )));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(CellValue::infer).collect());
    }

    TabularData::new(columns, rows)
}

// ---------------------------------------------------------------------------
// Workbooks
// ---------------------------------------------------------------------------

/// Read the first sheet; its first row is the header.
fn load_workbook(path: &Path) -> Result<TabularData, LoadError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::ParseFailed(format!("{} contains no sheets", path.display())))??;

    let mut sheet_rows = range.rows();
    let columns: Vec<String> = match sheet_rows.next() {
        Some(header) => header
            .iter()
            .enumerate()
            .map(|(idx, cell)| header_name(idx, cell.to_string()))
            .collect(),
        None => {
            return Err(LoadError::ParseFailed(format!(
                "{} has an empty first sheet",
                path.display()
            )))
        }
    };

    let width = columns.len();
    let rows = sheet_rows
        .map(|row| {
            let mut cells: Vec<CellValue> = row.iter().map(workbook_value).collect();
            cells.resize(width, CellValue::Null);
            cells
        })
        .collect();

    TabularData::new(columns, rows)
}

fn workbook_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => CellValue::Text(s.clone()),
        // Dates, durations and error cells keep their textual form.
        other => CellValue::Text(other.to_string()),
    }
}
