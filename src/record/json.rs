//! Records backed by decoded JSON documents.

use crate::record::{NativeValue, Record};
use serde_json::{Map, Value};

/// Map a JSON value onto the native view.
///
/// Integral numbers keep their integer representation (signed when they fit
/// in `i64`, unsigned otherwise); everything else is read as `f64`. Arrays
/// and objects are not comparable.
pub fn native_value(value: &Value) -> NativeValue<'_> {
    match value {
        Value::Null => NativeValue::Null,
        Value::Bool(b) => NativeValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                NativeValue::Int64(i)
            } else if let Some(u) = n.as_u64() {
                NativeValue::UInt64(u)
            } else if let Some(f) = n.as_f64() {
                NativeValue::Float64(f)
            } else {
                NativeValue::Unsupported(n.to_string())
            }
        }
        Value::String(s) => NativeValue::String(s),
        Value::Array(_) | Value::Object(_) => NativeValue::Unsupported(value.to_string()),
    }
}

impl Record for Map<String, Value> {
    fn lookup(&self, field: &str) -> NativeValue<'_> {
        self.get(field).map_or(NativeValue::Absent, native_value)
    }
}

/// Only JSON objects have fields; any other document reports every field
/// as absent.
impl Record for Value {
    fn lookup(&self, field: &str) -> NativeValue<'_> {
        match self {
            Value::Object(map) => map.lookup(field),
            _ => NativeValue::Absent,
        }
    }
}
