//! JSON text and file interchange

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::{DeserializeOwned, Error as _};
use serde_json::{Map, Value as Json};

use super::record::ArrayRecord;
use crate::dense::NdArray;
use crate::error::Result;
use crate::nested::Nested;

/// Decode a record object or a bare nested list.
///
/// Leaves always go through `Nested::try_from`, so a bad leaf yields the
/// same error whether or not it is wrapped in a record.
fn decode_record(json: Json) -> Result<ArrayRecord> {
    match json {
        Json::Array(_) => Ok(ArrayRecord::from_data(Nested::try_from(json)?)),
        Json::Object(mut fields) => {
            let data = fields
                .remove("data")
                .ok_or_else(|| serde_json::Error::missing_field("data"))?;
            let mut record = ArrayRecord::from_data(Nested::try_from(data)?);
            record.shape = annotation(&mut fields, "shape")?;
            record.ndim = annotation(&mut fields, "ndim")?;
            record.size = annotation(&mut fields, "size")?;
            Ok(record)
        }
        other => Ok(serde_json::from_value(other)?),
    }
}

fn annotation<T: DeserializeOwned>(
    fields: &mut Map<String, Json>,
    key: &str,
) -> Result<Option<T>> {
    match fields.remove(key) {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(None),
    }
}

impl NdArray {
    /// Compact JSON encoding of [`to_record`](Self::to_record)
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let table = NdArray::from_nested([[1, 2], [3, 4]]).unwrap();
    /// assert_eq!(
    ///     table.to_json().unwrap(),
    ///     r#"{"data":[[1,2],[3,4]],"shape":[2,2],"ndim":2,"size":4}"#
    /// );
    /// ```
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    /// Indented JSON encoding of [`to_record`](Self::to_record)
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_record())?)
    }

    /// Decode a table from JSON
    ///
    /// Accepts a record object, of which only `data` is read, or a bare
    /// nested list.
    ///
    /// # Errors
    ///
    /// - [`TableError::Json`](crate::TableError::Json) for malformed JSON or
    ///   a record without `data`
    /// - [`TableError::Type`](crate::TableError::Type) if the data contains
    ///   objects, with or without a record around it
    /// - [`TableError::Shape`](crate::TableError::Shape) for jagged data
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Value};
    ///
    /// let table = NdArray::from_json(r#"{"data": [[1.5, "x"], [null, true]]}"#).unwrap();
    /// assert_eq!(table.shape(), &[2, 2]);
    /// assert_eq!(table.get(&[1, 0]).unwrap(), &Value::Null);
    ///
    /// let bare = NdArray::from_json("[1, 2, 3]").unwrap();
    /// assert_eq!(bare.size(), 3);
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        let json: Json = serde_json::from_str(text)?;
        NdArray::from_record(decode_record(json)?)
    }

    /// Write the pretty JSON form to a file
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Io`](crate::TableError::Io) if the file cannot
    /// be created or written.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &self.to_record())?;
        writer.flush()?;
        tracing::debug!(path = %path.display(), shape = ?self.shape(), "saved table");
        Ok(())
    }

    /// Read a table written by [`save_json`](Self::save_json)
    ///
    /// Accepts the same forms as [`from_json`](Self::from_json).
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let json: Json = serde_json::from_reader(reader)?;
        let table = NdArray::from_record(decode_record(json)?)?;
        tracing::debug!(path = %path.display(), shape = ?table.shape(), "loaded table");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_json_keeps_float_marker() {
        let table = NdArray::from_nested(vec![Value::Float(2.0), Value::Int(2)]).unwrap();
        let json = table.to_json().unwrap();
        assert!(json.contains("[2.0,2]"));
        assert_eq!(NdArray::from_json(&json).unwrap(), table);
    }

    #[test]
    fn test_json_mixed_leaves_round_trip() {
        let table = NdArray::from_nested(vec![
            vec![Value::from("a"), Value::Null],
            vec![Value::Bool(false), Value::Float(-0.25)],
        ])
        .unwrap();
        assert_eq!(NdArray::from_json(&table.to_json_pretty().unwrap()).unwrap(), table);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            NdArray::from_json("{not json").unwrap_err(),
            crate::TableError::Json(_)
        ));
        assert!(matches!(
            NdArray::from_json(r#"{"shape": [2]}"#).unwrap_err(),
            crate::TableError::Json(_)
        ));
        assert!(NdArray::from_json("[[1], [2, 3]]").unwrap_err().is_shape());
        assert!(NdArray::from_json(r#"[{"a": 1}]"#).unwrap_err().is_type());
        assert!(matches!(
            NdArray::from_json("5").unwrap_err(),
            crate::TableError::Json(_)
        ));
    }

    #[test]
    fn test_object_leaf_same_error_in_record() {
        let bare = NdArray::from_json(r#"[1, {"a": 1}]"#).unwrap_err();
        let wrapped = NdArray::from_json(r#"{"data": [1, {"a": 1}], "ndim": 1}"#).unwrap_err();
        assert!(bare.is_type());
        assert!(wrapped.is_type());
        assert_eq!(bare.to_string(), wrapped.to_string());
    }

    #[test]
    fn test_record_annotations_are_typed() {
        let err = NdArray::from_json(r#"{"data": [1], "shape": "wide"}"#).unwrap_err();
        assert!(matches!(err, crate::TableError::Json(_)));
        let table = NdArray::from_json(r#"{"data": [1, 2], "shape": null}"#).unwrap();
        assert_eq!(table.shape(), &[2]);
    }

    #[test]
    fn test_load_object_leaf_is_type_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"data": [[{"k": 0}]]}"#).unwrap();
        assert!(NdArray::load_json(&path).unwrap_err().is_type());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = NdArray::load_json(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, crate::TableError::Io(_)));
    }
}
