//! Core value and row types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::{AcornError, Result};

/// A positional argument or result cell.
///
/// The first five variants are bindable as procedure parameters. `Bytes`,
/// `Json` and `Array` occur in result rows but have no parameter type tag,
/// so the classifier rejects them at bind time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int64(i64),
    /// 64-bit floating point
    Float64(f64),
    /// UTF-8 string
    String(String),
    /// Binary data
    Bytes(Vec<u8>),
    /// JSON document
    Json(serde_json::Value),
    /// Array of values
    Array(Vec<Value>),
}

impl Value {
    /// Check if the value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Observed kind of this value, as reported in classification errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int64(_) => "integer",
            Value::Float64(_) => "double",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Json(_) => "json",
            Value::Array(_) => "array",
        }
    }

    /// Try to get as i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64, widening integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            Value::Int64(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Try to get as bool; integer 0/1 counts, matching how the wire
    /// protocol reports boolean columns
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            Value::Int64(0) => Some(false),
            Value::Int64(1) => Some(true),
            _ => None,
        }
    }

    /// Try to get as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Value::Json(v) => write!(f, "{}", v),
            Value::Array(v) => write!(f, "[{} items]", v.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int64(v as i64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int64(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float64(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// Builds a `Vec<Value>` argument list from mixed literals.
///
/// ```
/// use acorn_core::{values, Value};
///
/// let args = values![7, "ada", 12.5, Value::Null];
/// assert_eq!(args.len(), 4);
/// ```
#[macro_export]
macro_rules! values {
    () => { Vec::<$crate::Value>::new() };
    ($($v:expr),+ $(,)?) => { vec![$($crate::Value::from($v)),+] };
}

/// Wire type tag used when binding positional parameters.
///
/// The concatenation of one tag per argument, in argument order, is the
/// string handed to `Statement::bind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    /// Integer wire type (`i`); also the placeholder tag for NULL arguments
    Int,
    /// Double-precision wire type (`d`)
    Double,
    /// String wire type (`s`)
    Str,
}

impl TypeTag {
    /// Single-character wire form of the tag
    pub fn as_char(self) -> char {
        match self {
            TypeTag::Int => 'i',
            TypeTag::Double => 'd',
            TypeTag::Str => 's',
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A row from a procedure result
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    /// Create a new row
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by column index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Get a value by column name
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Convert to a HashMap
    pub fn to_map(&self) -> HashMap<String, Value> {
        self.columns
            .iter()
            .zip(self.values.iter())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Value of a named column, or a decode error naming the column.
    ///
    /// The `i64`/`f64`/`str`/`bool` variants below additionally require the
    /// cell to hold that kind. All of them are meant for `FromRow`
    /// implementations; the resolver attaches the record type name to the
    /// error on the way out.
    pub fn value(&self, column: &str) -> Result<&Value> {
        self.get_by_name(column)
            .ok_or_else(|| AcornError::decode(format!("missing column `{column}`")))
    }

    pub fn i64(&self, column: &str) -> Result<i64> {
        let value = self.value(column)?;
        value.as_i64().ok_or_else(|| Self::mismatch(column, "integer", value))
    }

    pub fn f64(&self, column: &str) -> Result<f64> {
        let value = self.value(column)?;
        value.as_f64().ok_or_else(|| Self::mismatch(column, "double", value))
    }

    pub fn str(&self, column: &str) -> Result<&str> {
        let value = self.value(column)?;
        value.as_str().ok_or_else(|| Self::mismatch(column, "string", value))
    }

    pub fn bool(&self, column: &str) -> Result<bool> {
        let value = self.value(column)?;
        value.as_bool().ok_or_else(|| Self::mismatch(column, "bool", value))
    }

    fn mismatch(column: &str, expected: &str, found: &Value) -> AcornError {
        AcornError::decode(format!(
            "column `{column}` holds {}, expected {expected}",
            found.kind()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_row() -> Row {
        Row::new(
            vec!["id".into(), "name".into(), "balance".into()],
            vec![Value::Int64(7), Value::String("ada".into()), Value::Float64(12.5)],
        )
    }

    #[test]
    fn value_kinds() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::Bool(true).kind(), "bool");
        assert_eq!(Value::Int64(1).kind(), "integer");
        assert_eq!(Value::Float64(1.0).kind(), "double");
        assert_eq!(Value::String("x".into()).kind(), "string");
        assert_eq!(Value::Json(serde_json::json!({})).kind(), "json");
        assert_eq!(Value::Array(vec![]).kind(), "array");
    }

    #[test]
    fn value_accessors() {
        assert_eq!(Value::Int64(3).as_i64(), Some(3));
        assert_eq!(Value::Int64(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float64(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::Int64(1).as_bool(), Some(true));
        assert_eq!(Value::Int64(0).as_bool(), Some(false));
        assert_eq!(Value::Int64(2).as_bool(), None);
        assert_eq!(Value::String("x".into()).as_str(), Some("x"));
        assert!(Value::Null.is_null());
    }

    #[test]
    fn values_macro_matches_from_conversions() {
        let args = values![7, "ada", 12.5, true, Value::Null];
        assert_eq!(
            args,
            vec![
                Value::from(7),
                Value::from("ada"),
                Value::from(12.5),
                Value::from(true),
                Value::Null,
            ]
        );
        assert!(values![].is_empty());
    }

    #[test]
    fn option_conversion_maps_none_to_null() {
        assert_eq!(Value::from(Some(3)), Value::Int64(3));
        assert_eq!(Value::from(Option::<i64>::None), Value::Null);
    }

    #[test]
    fn type_tag_chars() {
        assert_eq!(TypeTag::Int.as_char(), 'i');
        assert_eq!(TypeTag::Double.as_char(), 'd');
        assert_eq!(TypeTag::Str.as_char(), 's');
        assert_eq!(TypeTag::Double.to_string(), "d");
    }

    #[test]
    fn row_lookup_by_index_and_name() {
        let row = sample_row();
        assert_eq!(row.get(0), Some(&Value::Int64(7)));
        assert_eq!(row.get_by_name("name"), Some(&Value::String("ada".into())));
        assert_eq!(row.get_by_name("missing"), None);
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn row_typed_getters() {
        let row = sample_row();
        assert_eq!(row.i64("id").unwrap(), 7);
        assert_eq!(row.str("name").unwrap(), "ada");
        assert_eq!(row.f64("balance").unwrap(), 12.5);
        assert_eq!(row.f64("id").unwrap(), 7.0);
    }

    #[test]
    fn row_missing_column_is_a_decode_error() {
        let row = sample_row();
        let err = row.i64("missing").unwrap_err();
        assert!(matches!(err, AcornError::Decode { .. }));
        assert!(err.to_string().contains("missing column `missing`"));
    }

    #[test]
    fn row_kind_mismatch_names_column_and_kinds() {
        let row = sample_row();
        let err = row.i64("name").unwrap_err();
        assert!(err.to_string().contains("column `name` holds string"));
    }

    #[test]
    fn row_to_map_keeps_all_columns() {
        let map = sample_row().to_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map["balance"], Value::Float64(12.5));
    }
}
