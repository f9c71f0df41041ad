//! CSV text interchange for two-axis tables
//!
//! One line per row, comma-separated. Cells read back as an integer if they
//! parse as one, else a float, else the raw text; an empty cell is `Null`.

use csv::{ReaderBuilder, Terminator, WriterBuilder};

use crate::dense::NdArray;
use crate::error::{Result, TableError};
use crate::nested::Nested;
use crate::value::Value;

impl NdArray {
    /// Encode a two-axis table as CSV text without a trailing newline
    ///
    /// `Null` is written as an empty cell. Cells containing a comma, quote
    /// or newline are quoted. A table with no rows or no columns encodes as
    /// the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DimensionMismatch`] unless the table has exactly
    /// two axes.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let table = NdArray::from_nested([[1, 2, 3], [4, 5, 6]]).unwrap();
    /// assert_eq!(table.to_csv().unwrap(), "1,2,3\n4,5,6");
    /// ```
    pub fn to_csv(&self) -> Result<String> {
        if self.ndim() != 2 {
            return Err(TableError::dimension(format!(
                "CSV export only works on 2D tables, got {} dimensions",
                self.ndim()
            )));
        }
        let cols = self.shape[1];
        if self.is_empty() {
            return Ok(String::new());
        }

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        for row in self.data.chunks(cols) {
            writer.write_record(row.iter().map(format_cell))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| TableError::Io(e.into_error()))?;
        let mut text = String::from_utf8(bytes)
            .map_err(|e| TableError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
        if text.ends_with('\n') {
            text.pop();
        }
        Ok(text)
    }

    /// Parse CSV text into a two-axis table
    ///
    /// Blank lines are skipped; empty input gives [`NdArray::empty`].
    ///
    /// # Errors
    ///
    /// - [`TableError::Shape`] if the rows have different lengths
    /// - [`TableError::Csv`] for malformed quoting
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Value};
    ///
    /// let table = NdArray::from_csv("1,2.5,x\n4,,6").unwrap();
    /// assert_eq!(table.shape(), &[2, 3]);
    /// assert_eq!(table.get(&[0, 1]).unwrap(), &Value::Float(2.5));
    /// assert_eq!(table.get(&[0, 2]).unwrap(), &Value::from("x"));
    /// assert_eq!(table.get(&[1, 1]).unwrap(), &Value::Null);
    ///
    /// assert!(NdArray::from_csv("1,2\n3").unwrap_err().is_shape());
    /// ```
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(Nested::List(
                record.iter().map(|cell| Nested::Leaf(parse_cell(cell))).collect(),
            ));
        }
        if rows.is_empty() {
            return Ok(NdArray::empty());
        }
        tracing::debug!(rows = rows.len(), "parsed CSV");
        NdArray::from_nested(Nested::List(rows))
    }
}

fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn parse_cell(cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(x) = trimmed.parse::<f64>() {
        return Value::Float(x);
    }
    Value::Text(cell.to_owned())
}
