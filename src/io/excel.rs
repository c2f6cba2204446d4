use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::core::data_value::DataValue;
use crate::core::error::{Error, Result};
use crate::core::table::RawTable;

/// Read a source table from a spreadsheet (.xlsx, .xls, .xlsb, .ods)
///
/// # Arguments
///
/// * `path` - Path to the workbook
/// * `table` - Logical table name, used in error messages
/// * `sheet_name` - Name of the sheet to read. If None, reads the first sheet
///
/// The first row of the sheet is the header row.
pub fn read_excel<P: AsRef<Path>>(path: P, table: &str, sheet_name: Option<&str>) -> Result<RawTable> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| Error::Excel(format!("Could not open {}: {}", path.display(), e)))?;

    let sheet_name = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| Error::Excel(format!("{} has no sheets", path.display())))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::Excel(format!("Could not read sheet '{}': {}", sheet_name, e)))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|cell| cell.to_string()).collect(),
        None => {
            return Err(Error::EmptyData(format!(
                "sheet '{}' of {} has no header row",
                sheet_name,
                path.display()
            )))
        }
    };

    let mut raw = RawTable::new(table, headers);
    for row in rows {
        raw.push_row(row.iter().map(convert_cell).collect());
    }

    Ok(raw)
}

fn convert_cell(cell: &Data) -> DataValue {
    match cell {
        Data::Empty => DataValue::Empty,
        Data::Int(v) => DataValue::Int(*v),
        Data::Float(v) => DataValue::Float(*v),
        Data::Bool(v) => DataValue::Bool(*v),
        Data::String(s) => DataValue::from_text(s),
        // Durations keep their raw day count
        Data::DateTime(dt) => match dt.as_datetime().filter(|_| dt.is_datetime()) {
            Some(value) => DataValue::DateTime(value),
            None => DataValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => DataValue::from_text(s),
        Data::Error(e) => DataValue::Text(e.to_string()),
    }
}
