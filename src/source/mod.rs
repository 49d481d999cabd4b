//! # Sheet Sources
//!
//! The boundary between the pipeline and whatever holds the input workbook.
//! A [`SheetSource`] hands back raw tables; [`read_sheet`] applies the
//! normalization every stage relies on.
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | `MemorySource` | `memory` | Tables built in code, for tests and embedding |
//! | `XlsxSource` | `xlsx` | Excel workbook via calamine |

pub mod memory;
#[cfg(feature = "xlsx")]
pub mod xlsx;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::model::{Table, Value};
use crate::{Error, Result};

pub use memory::MemorySource;
#[cfg(feature = "xlsx")]
pub use xlsx::XlsxSource;

/// A named collection of sheets.
pub trait SheetSource {
    fn sheet_names(&self) -> Vec<String>;

    /// Raw sheet contents, header order preserved. Only called with a name
    /// returned by [`SheetSource::sheet_names`].
    fn load_sheet(&self, name: &str) -> Result<Table>;
}

/// Load `sheet`, strip trailing whitespace from text, and zero-fill absent
/// values in `value_fields`. Other absent fields stay absent.
pub fn read_sheet<S: SheetSource + ?Sized>(
    source: &S,
    sheet: &str,
    value_fields: &[&str],
) -> Result<Table> {
    if !source.sheet_names().iter().any(|name| name == sheet) {
        return Err(Error::SheetNotFound { sheet: sheet.to_string() });
    }
    let raw = source.load_sheet(sheet)?;
    let present: Vec<&str> = value_fields.iter().copied().filter(|f| raw.has_column(f)).collect();

    let table = raw
        .map_values(|_, value| match value {
            Value::String(s) => Value::String(s.trim_end().to_string()),
            other => other,
        })
        .fill_null(Some(present.as_slice()), &Value::Float(0.0));

    debug!(sheet, rows = table.len(), columns = table.columns().len(), "read sheet");
    Ok(table)
}

/// Pick the highest-versioned `.xlsx` in `dir` whose name contains `prefix`.
///
/// The version is the integer between the first `(` and the next `)`, so
/// `Ecosystem v.1(12).xlsx` beats `Ecosystem v.1(9).xlsx`.
pub fn find_latest_input_file(dir: &Path, prefix: &str) -> Result<PathBuf> {
    let mut best: Option<(u64, PathBuf)> = None;

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else { continue };
        let is_xlsx = path.extension().is_some_and(|ext| ext == "xlsx");
        if !is_xlsx || !file_name.contains(prefix) {
            continue;
        }
        let Some(version) = parse_version(file_name) else {
            debug!(file_name, "skipping input without a version marker");
            continue;
        };
        if best.as_ref().is_none_or(|(v, _)| version > *v) {
            best = Some((version, path));
        }
    }

    let (version, path) = best.ok_or_else(|| {
        Error::InputNotFound(format!("no '{prefix}' workbook in {}", dir.display()))
    })?;
    info!(path = %path.display(), version, "using input file");
    Ok(path)
}

fn parse_version(file_name: &str) -> Option<u64> {
    let open = file_name.find('(')?;
    let rest = &file_name[open + 1..];
    let close = rest.find(')')?;
    rest[..close].trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;
    use pretty_assertions::assert_eq;

    fn source() -> MemorySource {
        MemorySource::new().with_sheet(
            "Prime Contractor",
            Table::from_rows([
                Row::new().with("Name", "Acme  ").with("Total spending in $B", Value::Null).with("Notes", Value::Null),
                Row::new().with("Name", "Bolt").with("Total spending in $B", 4.0),
            ]),
        )
    }

    #[test]
    fn test_read_sheet_trims_and_zero_fills_value_fields_only() {
        let t = read_sheet(&source(), "Prime Contractor", &["Total spending in $B", "Spending 2021-25 in $B"]).unwrap();
        assert_eq!(t.rows()[0].get("Name"), &Value::from("Acme"));
        assert_eq!(t.rows()[0].get("Total spending in $B"), &Value::Float(0.0));
        assert!(t.rows()[0].get("Notes").is_null());
        // value field the sheet never had is not invented
        assert!(!t.has_column("Spending 2021-25 in $B"));
    }

    #[test]
    fn test_missing_sheet() {
        let err = read_sheet(&source(), "Overview", &[]).unwrap_err();
        assert!(matches!(err, Error::SheetNotFound { ref sheet } if sheet == "Overview"));
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("Overall defence capability ecosystem v.1(14).xlsx"), Some(14));
        assert_eq!(parse_version("ecosystem v.1().xlsx"), None);
        assert_eq!(parse_version("ecosystem.xlsx"), None);
    }

    #[test]
    fn test_find_latest_input_file() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["Eco v.1(3).xlsx", "Eco v.1(12).xlsx", "Eco v.1(9).xlsx", "Eco v.1(40).csv", "Other(99).xlsx"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let found = find_latest_input_file(dir.path(), "Eco v.1(").unwrap();
        assert_eq!(found.file_name().unwrap(), "Eco v.1(12).xlsx");
    }

    #[test]
    fn test_find_latest_input_file_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(find_latest_input_file(dir.path(), "Eco"), Err(Error::InputNotFound(_))));
    }
}
