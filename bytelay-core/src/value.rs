//! Native container values produced and consumed by the marshal engine

use serde::{Deserialize, Serialize};

/// A decoded (or to-be-encoded) native value
///
/// `Record` preserves field declaration order; `Seq` backs both arrays and
/// tuples. Text is plain ASCII, one byte per character on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Unsigned integer (u8 through u64 kinds)
    UInt(u64),

    /// Signed integer (i8 through i64 kinds)
    Int(i64),

    /// IEEE-754 floating point (f32 widened to f64 on decode)
    Float(f64),

    /// Boolean (any nonzero byte/word decodes as true)
    Bool(bool),

    /// ASCII text, exactly as long as the layout declares
    Str(String),

    /// Ordered sequence backing arrays and tuples
    Seq(Vec<Value>),

    /// Ordered field mapping backing records
    Record(Vec<(String, Value)>),
}

impl Value {
    /// Build a record value from `(name, value)` pairs, preserving order
    pub fn record<S, I>(fields: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Value)>,
    {
        Value::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a sequence value from an iterator of values
    pub fn seq<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::Seq(items.into_iter().collect())
    }

    /// Look up a field by name in a record value
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// View as an unsigned integer, accepting non-negative signed values
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::UInt(v) => Some(v),
            Value::Int(v) if v >= 0 => Some(v as u64),
            _ => None,
        }
    }

    /// View as a signed integer, accepting unsigned values that fit
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(v) => Some(v),
            Value::UInt(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// View as a float
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }

    /// View as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// View as text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// View as a sequence
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// View as record fields
    pub fn as_record(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Shape name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::UInt(_) => "unsigned integer",
            Value::Int(_) => "signed integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "text",
            Value::Seq(_) => "sequence",
            Value::Record(_) => "record",
        }
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::UInt(v.into())
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::UInt(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Int(v.into())
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int(v.into())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_lookup_preserves_order() {
        let record = Value::record([("a", Value::from(1u32)), ("b", Value::from(2u32))]);

        assert_eq!(record.get("b"), Some(&Value::UInt(2)));
        assert_eq!(record.get("missing"), None);

        let fields = record.as_record().unwrap();
        assert_eq!(fields[0].0, "a");
        assert_eq!(fields[1].0, "b");
    }

    #[test]
    fn test_integer_views_cross_sign() {
        assert_eq!(Value::Int(7).as_u64(), Some(7));
        assert_eq!(Value::Int(-1).as_u64(), None);
        assert_eq!(Value::UInt(u64::MAX).as_i64(), None);
        assert_eq!(Value::UInt(42).as_i64(), Some(42));
    }

    #[test]
    fn test_shape_names() {
        assert_eq!(Value::Str("x".into()).type_name(), "text");
        assert_eq!(Value::seq([]).type_name(), "sequence");
    }
}
