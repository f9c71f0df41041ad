//! Reductions over all leaves
//!
//! This module provides sum, mean, min and max. Sums stay integral while
//! every leaf is an integer and promote to floats otherwise.

use std::cmp::Ordering;

use super::types::NdArray;
use crate::error::{Result, TableError};
use crate::value::Value;

impl NdArray {
    /// Sum of all leaves
    ///
    /// An empty table sums to `Int(0)`. Integer leaves are totalled exactly,
    /// so intermediate overflow cancels out; the result is an `Int` when the
    /// final total fits and a `Float` otherwise. Any float leaf makes the
    /// result a float.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Type`] naming the first non-numeric leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Value};
    ///
    /// let ints = NdArray::from_nested([[1, 2], [3, 4]]).unwrap();
    /// assert_eq!(ints.sum().unwrap(), Value::Int(10));
    ///
    /// let mixed = NdArray::from_nested(vec![Value::Int(1), Value::Float(0.5)]).unwrap();
    /// assert_eq!(mixed.sum().unwrap(), Value::Float(1.5));
    ///
    /// assert_eq!(NdArray::empty().sum().unwrap(), Value::Int(0));
    /// ```
    pub fn sum(&self) -> Result<Value> {
        let mut ints: i128 = 0;
        let mut floats: Option<f64> = None;
        for (pos, v) in self.data.iter().enumerate() {
            match *v {
                Value::Int(i) => ints += i128::from(i),
                Value::Float(f) => *floats.get_or_insert(0.0) += f,
                _ => return Err(Self::non_numeric("sum", v, pos)),
            }
        }
        Ok(match floats {
            Some(f) => Value::Float(ints as f64 + f),
            None => i64::try_from(ints).map_or(Value::Float(ints as f64), Value::Int),
        })
    }

    /// Arithmetic mean of all leaves
    ///
    /// # Errors
    ///
    /// - [`TableError::Domain`] if the table is empty (checked first)
    /// - [`TableError::Type`] if a leaf is not numeric
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let table = NdArray::from_nested([1, 2, 3, 4]).unwrap();
    /// assert_eq!(table.mean().unwrap(), 2.5);
    /// assert!(NdArray::empty().mean().unwrap_err().is_domain());
    /// ```
    pub fn mean(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(TableError::domain("mean of an empty table"));
        }
        let total = self.sum()?;
        let total = total.as_f64().ok_or_else(|| {
            TableError::type_error(format!("non-numeric sum {}", total.type_name()))
        })?;
        Ok(total / self.size() as f64)
    }

    /// Smallest leaf; the first one wins among equals
    ///
    /// # Errors
    ///
    /// - [`TableError::Domain`] if the table is empty
    /// - [`TableError::Type`] if two leaves cannot be compared
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Value};
    ///
    /// let words = NdArray::from_nested(["pear", "apple", "fig"]).unwrap();
    /// assert_eq!(words.min().unwrap(), Value::from("apple"));
    /// ```
    pub fn min(&self) -> Result<Value> {
        self.extreme("min", Ordering::Less)
    }

    /// Largest leaf; the first one wins among equals
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Value};
    ///
    /// let table = NdArray::from_nested(vec![Value::Int(3), Value::Float(7.5), Value::Int(-2)]).unwrap();
    /// assert_eq!(table.max().unwrap(), Value::Float(7.5));
    /// ```
    pub fn max(&self) -> Result<Value> {
        self.extreme("max", Ordering::Greater)
    }

    fn extreme(&self, op: &str, wanted: Ordering) -> Result<Value> {
        let mut leaves = self.data.iter();
        let Some(mut best) = leaves.next() else {
            return Err(TableError::domain(format!("{op} of an empty table")));
        };
        for v in leaves {
            if v.compare(best)? == wanted {
                best = v;
            }
        }
        // a single leaf must still be orderable
        best.compare(best)?;
        Ok(best.clone())
    }

    fn non_numeric(op: &str, leaf: &Value, pos: usize) -> TableError {
        TableError::type_error(format!(
            "{op} requires numeric leaves, found {} at flat position {pos}",
            leaf.type_name()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_rejects_text() {
        let table = NdArray::from_nested(vec![Value::Int(1), Value::from("2")]).unwrap();
        assert!(table.sum().unwrap_err().is_type());
    }

    #[test]
    fn test_sum_rejects_bool() {
        let table = NdArray::from_nested([true, false]).unwrap();
        assert!(table.sum().unwrap_err().is_type());
    }

    #[test]
    fn test_sum_overflow_promotes() {
        let table = NdArray::from_nested(vec![Value::Int(i64::MAX), Value::Int(1)]).unwrap();
        assert!(matches!(table.sum().unwrap(), Value::Float(_)));
    }

    #[test]
    fn test_sum_exact_through_intermediate_overflow() {
        let table =
            NdArray::from_nested(vec![Value::Int(i64::MAX), Value::Int(1), Value::Int(-1)]).unwrap();
        assert_eq!(table.sum().unwrap(), Value::Int(i64::MAX));
        let low = NdArray::from_nested(vec![Value::Int(i64::MIN), Value::Int(-1), Value::Int(1)]).unwrap();
        assert_eq!(low.sum().unwrap(), Value::Int(i64::MIN));
    }

    #[test]
    fn test_mean_empty_checked_before_type() {
        let table = NdArray::create(&[0, 2], "x").unwrap();
        assert!(table.mean().unwrap_err().is_domain());
    }

    #[test]
    fn test_min_max_errors() {
        assert!(NdArray::empty().min().unwrap_err().is_domain());
        assert!(NdArray::empty().max().unwrap_err().is_domain());
        let mixed = NdArray::from_nested(vec![Value::Int(1), Value::from("a")]).unwrap();
        assert!(mixed.max().unwrap_err().is_type());
        let nulls = NdArray::create(&[1], Value::Null).unwrap();
        assert!(nulls.min().unwrap_err().is_type());
    }

    #[test]
    fn test_min_numeric_mixed_kinds() {
        let table = NdArray::from_nested(vec![Value::Float(2.5), Value::Int(2), Value::Int(9)]).unwrap();
        assert_eq!(table.min().unwrap(), Value::Int(2));
        assert_eq!(table.max().unwrap(), Value::Int(9));
    }
}
