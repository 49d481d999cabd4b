//! Excel workbook source (calamine).

use std::cell::RefCell;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader, Sheets};

use super::SheetSource;
use crate::model::{Row, Table, Value};
use crate::{Error, Result};

/// Sheets are decoded lazily, one per [`SheetSource::load_sheet`] call.
pub struct XlsxSource {
    path: PathBuf,
    workbook: RefCell<Sheets<BufReader<File>>>,
}

impl XlsxSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let workbook = open_workbook_auto(&path)
            .map_err(|e| Error::Spreadsheet(format!("{}: {e}", path.display())))?;
        Ok(Self { path, workbook: RefCell::new(workbook) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetSource for XlsxSource {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.borrow().sheet_names()
    }

    fn load_sheet(&self, name: &str) -> Result<Table> {
        let range = self.workbook
            .borrow_mut()
            .worksheet_range(name)
            .map_err(|e| Error::Spreadsheet(format!("{name}: {e}")))?;

        let mut rows = range.rows();
        let Some(header_cells) = rows.next() else {
            return Ok(Table::new());
        };
        let header: Vec<String> = header_cells.iter().enumerate()
            .map(|(i, cell)| match cell {
                Data::Empty => format!("Unnamed: {i}"),
                Data::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();

        let mut table = Table::with_columns(&header);
        for (i, cells) in rows.enumerate() {
            if cells.iter().all(|c| matches!(c, Data::Empty)) {
                continue;
            }
            let mut row = Row::new();
            for (col, cell) in header.iter().zip(cells) {
                let value = cell_value(cell).map_err(|message| Error::MalformedRow {
                    sheet: name.to_string(),
                    // 1-based, after the header row
                    row: i + 2,
                    message: format!("{col}: {message}"),
                })?;
                row.set(col.as_str(), value);
            }
            table.push(row);
        }
        Ok(table)
    }
}

fn cell_value(cell: &Data) -> std::result::Result<Value, String> {
    Ok(match cell {
        Data::Empty => Value::Null,
        Data::Bool(b) => Value::Bool(*b),
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => Value::Float(*f),
        Data::String(s) => Value::String(s.clone()),
        Data::Error(e) => return Err(format!("cell error {e:?}")),
        Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => Value::String(cell.to_string()),
    })
}
