//! Readers for the tabular sources behind the ledger
//!
//! Every reader produces a [`RawTable`]; the format is picked from the file
//! extension.

pub mod csv;
pub mod excel;

use std::path::Path;

use crate::core::error::{Error, Result};
use crate::core::table::RawTable;

pub use self::csv::read_csv;
pub use self::excel::read_excel;

/// Spreadsheet extensions handled by calamine
const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Read one source table, dispatching on the file extension.
///
/// `sheet` selects a worksheet for spreadsheet sources (first sheet when `None`)
/// and is ignored for CSV.
pub fn read_table<P: AsRef<Path>>(path: P, table: &str, sheet: Option<&str>) -> Result<RawTable> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::SourceNotFound {
            table: table.to_string(),
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => read_csv(path, table),
        ext if SPREADSHEET_EXTENSIONS.contains(&ext) => read_excel(path, table, sheet),
        ext => Err(Error::UnsupportedFormat(format!(
            "{} (table '{}', extension '{}')",
            path.display(),
            table,
            ext
        ))),
    }
}
