use crate::buffer::{MatrixBuffer, TypedBuffer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dynamically shaped value: a number, a plain sequence or a record.
///
/// Unlike `serde_json::Value`, numbers are plain `f64`, so `NaN` results can
/// be written back into records. `NaN` serializes as `null`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<f64>> for Value {
    fn from(values: Vec<f64>) -> Self {
        Value::Array(values.into_iter().map(Value::Number).collect())
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(flag) => Value::Bool(flag),
            serde_json::Value::Number(number) => Value::Number(number.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(text) => Value::String(text),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Any input the dispatcher accepts, and any output it produces.
#[derive(Clone, Debug, PartialEq)]
pub enum Data {
    Value(Value),
    Typed(TypedBuffer),
    Matrix(MatrixBuffer),
}

impl Data {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Data::Value(value) => value.as_f64(),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Data::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        self.as_value().and_then(Value::as_array)
    }

    pub fn as_typed(&self) -> Option<&TypedBuffer> {
        match self {
            Data::Typed(buffer) => Some(buffer),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&MatrixBuffer> {
        match self {
            Data::Matrix(matrix) => Some(matrix),
            _ => None,
        }
    }

    /// Number of elements: 1 for scalars, 0 for anything unsupported.
    pub fn len(&self) -> usize {
        match self {
            Data::Value(Value::Number(_)) => 1,
            Data::Value(Value::Array(items)) => items.len(),
            Data::Value(_) => 0,
            Data::Typed(buffer) => buffer.len(),
            Data::Matrix(matrix) => matrix.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<f64> for Data {
    fn from(value: f64) -> Self {
        Data::Value(Value::Number(value))
    }
}

impl From<Vec<f64>> for Data {
    fn from(values: Vec<f64>) -> Self {
        Data::Value(Value::from(values))
    }
}

impl From<Value> for Data {
    fn from(value: Value) -> Self {
        Data::Value(value)
    }
}

impl From<serde_json::Value> for Data {
    fn from(value: serde_json::Value) -> Self {
        Data::Value(Value::from(value))
    }
}

impl From<TypedBuffer> for Data {
    fn from(buffer: TypedBuffer) -> Self {
        Data::Typed(buffer)
    }
}

impl From<MatrixBuffer> for Data {
    fn from(matrix: MatrixBuffer) -> Self {
        Data::Matrix(matrix)
    }
}
