//! Record access for expression evaluation.
//!
//! A record is any read-only mapping from field names to dynamically typed
//! values. The evaluator only ever asks one question of it: what is stored
//! under this field name? The answer is a [`NativeValue`] view, which keeps
//! the storage representation (integer width, float width, boolean, ...)
//! intact so normalization happens in one place, at resolution time.
//!
//! Provided implementations:
//!
//! - `HashMap<String, FieldValue>` and `BTreeMap<String, FieldValue>` for
//!   records built in Rust
//! - `serde_json::Map` and `serde_json::Value` for records decoded from JSON

pub mod json;
pub mod value;

use std::collections::{BTreeMap, HashMap};

pub use value::{FieldValue, NativeValue};

/// Read-only field lookup.
pub trait Record {
    /// Look up a field by name, returning [`NativeValue::Absent`] when the
    /// record has no such field.
    fn lookup(&self, field: &str) -> NativeValue<'_>;
}

impl<R: Record + ?Sized> Record for &R {
    fn lookup(&self, field: &str) -> NativeValue<'_> {
        (**self).lookup(field)
    }
}

impl Record for HashMap<String, FieldValue> {
    fn lookup(&self, field: &str) -> NativeValue<'_> {
        self.get(field)
            .map_or(NativeValue::Absent, FieldValue::as_native)
    }
}

impl Record for BTreeMap<String, FieldValue> {
    fn lookup(&self, field: &str) -> NativeValue<'_> {
        self.get(field)
            .map_or(NativeValue::Absent, FieldValue::as_native)
    }
}
