//! @acp:module "Workbook Reader"
//! @acp:summary "Read workbook sheets into positional text grids"
//! @acp:domain cli
//! @acp:layer io
//!
//! Cells are coerced to text. Blank cells become empty strings, and the
//! grid keeps absolute positions so column letters from the layout config
//! line up even when a sheet's used range starts past `A1`.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader, Sheets};

use crate::config::{column_letters, SheetRef};
use crate::error::{Result, StrategyError};

/// @acp:summary "Rectangular-ish table of cell text addressed by (row, column)"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build a grid from string literals (handy for fixtures)
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Widest row length
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell text, or `""` outside the populated area
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Trimmed header labels for `header_row`, padded to the grid width
    pub fn header(&self, header_row: usize) -> Result<Vec<String>> {
        if header_row >= self.rows.len() {
            return Err(StrategyError::SchemaMismatch(format!(
                "header row {} is past the end of the sheet ({} rows)",
                header_row + 1,
                self.rows.len()
            )));
        }
        Ok((0..self.width())
            .map(|col| self.cell(header_row, col).trim().to_string())
            .collect())
    }

    /// Position of the first header cell equal to `label` (trimmed)
    pub fn find_column(&self, header_row: usize, label: &str) -> Option<usize> {
        let label = label.trim();
        (0..self.width()).find(|&col| self.cell(header_row, col).trim() == label)
    }

    /// Like [`Grid::find_column`] but reports a schema mismatch when absent
    pub fn require_column(&self, header_row: usize, label: &str, table: &str) -> Result<usize> {
        self.find_column(header_row, label).ok_or_else(|| {
            StrategyError::SchemaMismatch(format!(
                "{} table has no column named '{}'",
                table,
                label.trim()
            ))
        })
    }

    /// Rows below the header
    pub fn body(&self, header_row: usize) -> impl Iterator<Item = (usize, &[String])> {
        self.rows
            .iter()
            .enumerate()
            .skip(header_row + 1)
            .map(|(i, row)| (i, row.as_slice()))
    }

    /// Human label for a column position, e.g. `C`
    pub fn column_name(col: usize) -> String {
        column_letters(col)
    }
}

/// Anything that can hand out sheets as grids
pub trait TableSource {
    fn grid(&mut self, sheet: &SheetRef) -> Result<Grid>;
}

/// @acp:summary "calamine-backed workbook (.xlsx, .xlsm, .xls, .ods)"
pub struct Workbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl Workbook {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StrategyError::Workbook(format!(
                "workbook not found: {}",
                path.display()
            )));
        }
        let sheets = open_workbook_auto(path).map_err(|e| {
            StrategyError::Workbook(format!("failed to open {}: {}", path.display(), e))
        })?;
        tracing::info!("Opened workbook {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            sheets,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }
}

impl TableSource for Workbook {
    fn grid(&mut self, sheet: &SheetRef) -> Result<Grid> {
        let range = match sheet {
            SheetRef::Index(i) => self
                .sheets
                .worksheet_range_at(*i)
                .ok_or_else(|| {
                    StrategyError::SchemaMismatch(format!(
                        "{} does not exist in {} ({} sheets)",
                        sheet,
                        self.path.display(),
                        self.sheets.sheet_names().len()
                    ))
                })?
                .map_err(|e| StrategyError::Workbook(e.to_string()))?,
            SheetRef::Name(name) => {
                if !self.sheets.sheet_names().iter().any(|n| n == name) {
                    return Err(StrategyError::SchemaMismatch(format!(
                        "{} does not exist in {}",
                        sheet,
                        self.path.display()
                    )));
                }
                self.sheets
                    .worksheet_range(name)
                    .map_err(|e| StrategyError::Workbook(e.to_string()))?
            }
        };

        // Pad so that grid positions match sheet positions.
        let (row0, col0) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));
        let mut rows: Vec<Vec<String>> = vec![Vec::new(); row0];
        for row in range.rows() {
            let mut cells = vec![String::new(); col0];
            cells.extend(row.iter().map(cell_text));
            rows.push(cells);
        }

        tracing::debug!(
            "Read {} from {}: {} rows",
            sheet,
            self.path.display(),
            rows.len()
        );
        Ok(Grid::new(rows))
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// @acp:summary "In-memory sheets, used for fixtures and piped data"
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<(String, Grid)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, grid: Grid) -> Self {
        self.sheets.push((name.into(), grid));
        self
    }
}

impl TableSource for MemoryWorkbook {
    fn grid(&mut self, sheet: &SheetRef) -> Result<Grid> {
        let found = match sheet {
            SheetRef::Index(i) => self.sheets.get(*i),
            SheetRef::Name(name) => self.sheets.iter().find(|(n, _)| n == name),
        };
        found
            .map(|(_, grid)| grid.clone())
            .ok_or_else(|| StrategyError::SchemaMismatch(format!("{} does not exist", sheet)))
    }
}
