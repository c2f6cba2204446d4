use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::core::data_value::DataValue;
use crate::core::error::{Error, Result};
use crate::core::table::RawTable;

/// Read a source table from a CSV file with a header row
pub fn read_csv<P: AsRef<Path>>(path: P, table: &str) -> Result<RawTable> {
    let file = File::open(path.as_ref()).map_err(Error::Io)?;
    read_csv_from_reader(file, table)
}

/// Read a source table from any CSV stream with a header row
pub fn read_csv_from_reader<R: Read>(reader: R, table: &str) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(Error::Csv)?
        .iter()
        // Excel likes to prefix exported CSV files with a byte order mark
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut raw = RawTable::new(table, headers);
    for result in rdr.records() {
        let record = result.map_err(Error::Csv)?;
        raw.push_row(record.iter().map(DataValue::from_text).collect());
    }

    Ok(raw)
}
