//! Sibling-field context threaded through one record traversal

use crate::error::MarshalError;
use crate::value::Value;

/// Ordered name → value mapping built incrementally during one record's
/// decode or encode
///
/// A field's value is inserted only after that field has been fully
/// processed, so a dynamic length expression sees exactly the siblings
/// declared before the field it sizes. Each top-level `read`/`write` call
/// uses its own instance; nothing survives the call.
#[derive(Debug, Default)]
pub struct Context {
    fields: Vec<(String, Value)>,
}

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a processed field under its declared name
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.fields.push((name.into(), value));
    }

    /// Look up an already-processed sibling field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Look up a sibling field, failing if it has not been processed yet
    pub fn require(&self, name: &str) -> Result<&Value, MarshalError> {
        self.get(name)
            .ok_or_else(|| MarshalError::UnresolvedLength(name.to_owned()))
    }

    /// Read a sibling field as an integer length
    ///
    /// The common case for dynamic lengths: the byte/element count of a
    /// later field is the value of an earlier integer field.
    pub fn len_of(&self, name: &str) -> Result<i64, MarshalError> {
        let value = self.require(name)?;
        value.as_i64().ok_or(MarshalError::TypeMismatch {
            expected: "integer length field",
            found: value.type_name(),
        })
    }

    /// Consume the context into the record value it accumulated
    pub fn into_record(self) -> Value {
        Value::Record(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_follows_insertion_order() {
        let mut ctx = Context::new();
        assert!(matches!(
            ctx.require("count"),
            Err(MarshalError::UnresolvedLength(_))
        ));

        ctx.insert("count", Value::UInt(3));
        assert_eq!(ctx.len_of("count").unwrap(), 3);
    }

    #[test]
    fn test_len_of_rejects_non_integer_fields() {
        let mut ctx = Context::new();
        ctx.insert("name", Value::Str("abc".into()));

        assert!(matches!(
            ctx.len_of("name"),
            Err(MarshalError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_into_record_keeps_order() {
        let mut ctx = Context::new();
        ctx.insert("b", Value::UInt(2));
        ctx.insert("a", Value::UInt(1));

        let record = ctx.into_record();
        let fields = record.as_record().unwrap();
        assert_eq!(fields[0].0, "b");
        assert_eq!(fields[1].0, "a");
    }
}
