use chrono::NaiveDate;

use crate::core::data_value::DataValue;
use crate::core::error::{Error, Result};

static EMPTY: DataValue = DataValue::Empty;

/// Untyped table as read from a spreadsheet or CSV source: a header row and
/// the data rows below it.
#[derive(Debug, Clone)]
pub struct RawTable {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<DataValue>>,
}

impl RawTable {
    /// Create an empty table with the given headers
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        RawTable {
            name: name.into(),
            headers: headers.into_iter().map(|h| h.trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a data row. Rows without a single non-empty cell are skipped,
    /// which drops the blank tail many spreadsheets carry.
    pub fn push_row(&mut self, row: Vec<DataValue>) {
        if row.iter().all(DataValue::is_empty) {
            return;
        }
        self.rows.push(row);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, matched case-insensitively
    pub fn find_column(&self, column: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(column.trim()))
    }

    /// Position of a column that must exist
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.find_column(column).ok_or_else(|| Error::ColumnNotFound {
            table: self.name.clone(),
            column: column.to_string(),
        })
    }

    /// Cell at the given position; cells past the end of a short row are empty
    pub fn cell(&self, row: usize, col: usize) -> &DataValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    pub fn text(&self, row: usize, col: usize) -> Result<String> {
        let cell = self.cell(row, col);
        cell.as_text().ok_or_else(|| self.invalid(row, col))
    }

    pub fn optional_text(&self, row: usize, col: usize) -> Option<String> {
        self.cell(row, col).as_text()
    }

    pub fn key(&self, row: usize, col: usize) -> Result<String> {
        self.cell(row, col)
            .as_key()
            .ok_or_else(|| self.invalid(row, col))
    }

    pub fn number(&self, row: usize, col: usize) -> Result<f64> {
        self.cell(row, col)
            .as_f64()
            .ok_or_else(|| self.invalid(row, col))
    }

    /// Numeric cell that may be blank; present but unparsable cells are still errors
    pub fn optional_number(&self, row: usize, col: usize) -> Result<Option<f64>> {
        let cell = self.cell(row, col);
        if cell.is_empty() {
            return Ok(None);
        }
        cell.as_f64().map(Some).ok_or_else(|| self.invalid(row, col))
    }

    /// Whole-number cell converted to `T`; a value outside `T`'s range is
    /// invalid rather than wrapped
    pub fn integer<T: TryFrom<i64>>(&self, row: usize, col: usize) -> Result<T> {
        self.cell(row, col)
            .as_i64()
            .and_then(|v| T::try_from(v).ok())
            .ok_or_else(|| self.invalid(row, col))
    }

    pub fn date(&self, row: usize, col: usize) -> Result<NaiveDate> {
        self.cell(row, col)
            .as_date()
            .ok_or_else(|| self.invalid(row, col))
    }

    /// Error for a cell that does not hold the expected kind of value.
    /// Row numbers count the header as row 1, as a spreadsheet shows them.
    fn invalid(&self, row: usize, col: usize) -> Error {
        Error::InvalidValue {
            table: self.name.clone(),
            row: row + 2,
            column: self
                .headers
                .get(col)
                .cloned()
                .unwrap_or_else(|| format!("column_{}", col)),
            value: self.cell(row, col).to_string(),
        }
    }
}
