use std::io::Write;

use serde::Serialize;

use crate::core::error::{Error, Result};

/// A row type that can be laid out as a table
pub trait Tabular: Serialize {
    /// Column headers, in cell order
    fn headers() -> &'static [&'static str];

    /// Display form of each cell
    fn cells(&self) -> Vec<String>;
}

/// Result table of one query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Report<R> {
    rows: Vec<R>,
}

impl<R> Report<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Report { rows }
    }

    pub fn empty() -> Self {
        Report { rows: Vec::new() }
    }

    /// True when the query matched nothing; callers show a placeholder instead
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn first(&self) -> Option<&R> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&R> {
        self.rows.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }
}

impl<R: Tabular> Report<R> {
    pub fn headers(&self) -> &'static [&'static str] {
        R::headers()
    }

    /// Pretty JSON array of the rows
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.rows).map_err(Error::Json)
    }

    /// Write the rows as CSV with a header line
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(R::headers())?;
        for row in &self.rows {
            wtr.write_record(row.cells())?;
        }
        wtr.flush().map_err(Error::Io)?;
        Ok(())
    }

    /// Plain text table with columns padded to their widest cell
    pub fn to_text(&self) -> String {
        let headers = R::headers();
        let cells: Vec<Vec<String>> = self.rows.iter().map(Tabular::cells).collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, headers.iter().map(|h| h.to_string()), &widths);
        push_line(&mut out, widths.iter().map(|w| "-".repeat(*w)), &widths);
        for row in cells {
            push_line(&mut out, row.into_iter(), &widths);
        }
        out
    }
}

impl<'r, R> IntoIterator for &'r Report<R> {
    type Item = &'r R;
    type IntoIter = std::slice::Iter<'r, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

fn push_line<I: Iterator<Item = String>>(out: &mut String, cells: I, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

/// Fixed two-decimal form used for amounts in text and CSV output
pub fn fmt_amount(value: f64) -> String {
    format!("{:.2}", value)
}
