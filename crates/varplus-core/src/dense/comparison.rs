//! Predicate queries over leaves

use super::types::NdArray;
use crate::value::Value;

impl NdArray {
    /// Leaves satisfying `predicate`, in row-major order
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Value};
    ///
    /// let table = NdArray::from_nested([[1, 5], [7, 2]]).unwrap();
    /// let big = table.filter_elements(|v| v.as_i64().is_some_and(|x| x > 3));
    /// assert_eq!(big, vec![Value::Int(5), Value::Int(7)]);
    /// ```
    pub fn filter_elements<F>(&self, predicate: F) -> Vec<Value>
    where
        F: Fn(&Value) -> bool,
    {
        self.data.iter().filter(|v| predicate(v)).cloned().collect()
    }

    /// Count leaves satisfying a predicate
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let table = NdArray::from_nested([1, 2, 3, 4, 5]).unwrap();
    /// assert_eq!(table.count_if(|v| v.as_i64().is_some_and(|x| x > 3)), 2);
    /// ```
    pub fn count_if<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Value) -> bool,
    {
        self.data.iter().filter(|v| predicate(v)).count()
    }

    /// Test if all leaves satisfy a predicate (true for an empty table)
    pub fn all<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Value) -> bool,
    {
        self.data.iter().all(predicate)
    }

    /// Test if any leaf satisfies a predicate
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Value) -> bool,
    {
        self.data.iter().any(predicate)
    }
}
