use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// Datetime layouts accepted for text cells, tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d.%m.%Y %H:%M:%S",
];

/// Date layouts accepted for text cells, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// A single cell read from a tabular source
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    DateTime(NaiveDateTime),
}

impl DataValue {
    /// Build a cell from raw text, mapping blank text to `Empty`
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            DataValue::Empty
        } else {
            DataValue::Text(trimmed.to_string())
        }
    }

    /// Returns true for cells that hold nothing (or only whitespace)
    pub fn is_empty(&self) -> bool {
        match self {
            DataValue::Empty => true,
            DataValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Non-empty trimmed text form of the value
    pub fn as_text(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(self.to_string().trim().to_string())
    }

    /// Numeric form of the value; text is parsed leniently (`1 234,5` reads as 1234.5)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Int(v) => Some(*v as f64),
            DataValue::Float(v) => Some(*v),
            DataValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            DataValue::Text(s) => parse_number(s),
            DataValue::Empty | DataValue::DateTime(_) => None,
        }
    }

    /// Integer form of the value; floats are accepted only when integral
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DataValue::Int(v) => Some(*v),
            DataValue::Float(v) if v.fract() == 0.0 && v.is_finite() => Some(*v as i64),
            DataValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .ok()
                .or_else(|| parse_number(s).filter(|v| v.fract() == 0.0).map(|v| v as i64)),
            _ => None,
        }
    }

    /// Identifier form of the value. Integral floats lose their fraction so that a
    /// numeric `101.0` and a text `101` name the same key.
    pub fn as_key(&self) -> Option<String> {
        match self {
            DataValue::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => {
                Some(format!("{}", *v as i64))
            }
            DataValue::Text(s) => {
                let trimmed = s.trim();
                match trimmed.parse::<f64>() {
                    Ok(v) if v.fract() == 0.0 && v.abs() < 1e15 && trimmed.contains('.') => {
                        Some(format!("{}", v as i64))
                    }
                    _ => self.as_text(),
                }
            }
            _ => self.as_text(),
        }
    }

    /// Calendar date of the value, dropping any time of day
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            DataValue::DateTime(dt) => Some(dt.date()),
            DataValue::Text(s) => parse_date(s),
            _ => None,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Empty => Ok(()),
            DataValue::Int(v) => write!(f, "{}", v),
            DataValue::Float(v) => write!(f, "{}", v),
            DataValue::Bool(v) => write!(f, "{}", v),
            DataValue::Text(s) => write!(f, "{}", s),
            DataValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<f64>() {
        return Some(v);
    }
    let compact: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .collect();
    let normalized = if compact.contains(',') && !compact.contains('.') {
        compact.replace(',', ".")
    } else {
        compact.replace(',', "")
    };
    normalized.parse::<f64>().ok()
}

/// Parse a date from text in any of the accepted layouts
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    None
}
