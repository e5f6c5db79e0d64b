use std::collections::BTreeMap;
use std::fmt;

/// Values that can be stored in an in-memory record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    /// Composite values can be stored but never compared
    List(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Borrow this value as the view the evaluator consumes
    pub fn as_native(&self) -> NativeValue<'_> {
        match self {
            FieldValue::Null => NativeValue::Null,
            FieldValue::Bool(b) => NativeValue::Bool(*b),
            FieldValue::Int32(n) => NativeValue::Int32(*n),
            FieldValue::Int64(n) => NativeValue::Int64(*n),
            FieldValue::UInt32(n) => NativeValue::UInt32(*n),
            FieldValue::UInt64(n) => NativeValue::UInt64(*n),
            FieldValue::Float32(n) => NativeValue::Float32(*n),
            FieldValue::Float64(n) => NativeValue::Float64(*n),
            FieldValue::String(s) => NativeValue::String(s),
            FieldValue::List(_) | FieldValue::Map(_) => NativeValue::Unsupported(self.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int32(n) => write!(f, "{}", n),
            FieldValue::Int64(n) => write!(f, "{}", n),
            FieldValue::UInt32(n) => write!(f, "{}", n),
            FieldValue::UInt64(n) => write!(f, "{}", n),
            FieldValue::Float32(n) => write!(f, "{}", n),
            FieldValue::Float64(n) => write!(f, "{}", n),
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            FieldValue::Map(entries) => {
                write!(f, "map[")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}:{}", key, value)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int32(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int64(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::UInt32(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::UInt64(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float32(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float64(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Borrowed view of a record field, in the record's own representation.
///
/// `Absent` (no such field) and `Null` (field present, value null) are kept
/// apart so records can report either; the evaluator treats both as null.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue<'a> {
    Absent,
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    String(&'a str),
    /// A value of a kind the evaluator cannot compare, carried as its
    /// printed form for diagnostics
    Unsupported(String),
}

impl fmt::Display for NativeValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeValue::Absent | NativeValue::Null => write!(f, "<nil>"),
            NativeValue::Bool(b) => write!(f, "{}", b),
            NativeValue::Int32(n) => write!(f, "{}", n),
            NativeValue::Int64(n) => write!(f, "{}", n),
            NativeValue::UInt32(n) => write!(f, "{}", n),
            NativeValue::UInt64(n) => write!(f, "{}", n),
            NativeValue::Float32(n) => write!(f, "{}", n),
            NativeValue::Float64(n) => write!(f, "{}", n),
            NativeValue::String(s) => write!(f, "{}", s),
            NativeValue::Unsupported(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_views() {
        assert_eq!(FieldValue::Null.as_native(), NativeValue::Null);
        assert_eq!(FieldValue::Bool(false).as_native(), NativeValue::Bool(false));
        assert_eq!(FieldValue::UInt64(7).as_native(), NativeValue::UInt64(7));
        assert_eq!(FieldValue::Float32(1.5).as_native(), NativeValue::Float32(1.5));
        assert_eq!(
            FieldValue::from("hello").as_native(),
            NativeValue::String("hello")
        );
    }

    #[test]
    fn test_composite_values_are_unsupported() {
        let list = FieldValue::List(vec![FieldValue::Int32(1), FieldValue::from("a")]);
        assert_eq!(
            list.as_native(),
            NativeValue::Unsupported("[1 a]".to_string())
        );

        let mut entries = BTreeMap::new();
        entries.insert("k".to_string(), FieldValue::Bool(true));
        let map = FieldValue::Map(entries);
        assert_eq!(
            map.as_native(),
            NativeValue::Unsupported("map[k:true]".to_string())
        );
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(FieldValue::from(42i32), FieldValue::Int32(42));
        assert_eq!(FieldValue::from(42i64), FieldValue::Int64(42));
        assert_eq!(FieldValue::from(42u32), FieldValue::UInt32(42));
        assert_eq!(FieldValue::from(2.5f64), FieldValue::Float64(2.5));
        assert_eq!(FieldValue::from(true), FieldValue::Bool(true));
        assert_eq!(FieldValue::from(None::<i32>), FieldValue::Null);
        assert_eq!(
            FieldValue::from(Some("x".to_string())),
            FieldValue::String("x".to_string())
        );
    }
}
