//! JSON interop for [`Document`] trees.
//!
//! Class files and JSON objects are close cousins, and a JSON view is what
//! external tooling (diff harnesses, jq, snapshot fixtures) actually wants.
//! The mapping is direct: classes become objects, arrays become arrays,
//! integers and floats become numbers, and order is preserved both ways
//! (serde_json is built with `preserve_order`).
//!
//! The inverse direction is partial: JSON `null` and objects inside arrays
//! have no class-file representation and are rejected.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Number;

use crate::error::{Result, SimclassError};
use crate::types::{Document, Value};

/// Convert a document to a JSON object, preserving property order.
///
/// Non-finite floats have no JSON number form and map to `null`.
pub fn to_json(doc: &Document) -> serde_json::Value {
    let mut map = serde_json::Map::with_capacity(doc.len());
    for (name, value) in doc {
        map.insert(name.clone(), value_to_json(value));
    }
    serde_json::Value::Object(map)
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Integer(n) => serde_json::Value::Number(Number::from(*n)),
        Value::Float(f) => Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Class(doc) => to_json(doc),
    }
}

/// Convert a JSON object to a document.
///
/// Fails with [`SimclassError::Unrepresentable`] if the root is not an
/// object, or if the tree contains `null` or an object directly inside an
/// array.
pub fn from_json(value: &serde_json::Value) -> Result<Document> {
    let map = value
        .as_object()
        .ok_or_else(|| SimclassError::Unrepresentable("a non-object root".to_string()))?;

    let mut doc = Document::new();
    for (name, child) in map {
        doc.insert(name.clone(), value_from_json(child, false)?);
    }
    Ok(doc)
}

fn value_from_json(value: &serde_json::Value, inside_array: bool) -> Result<Value> {
    match value {
        serde_json::Value::Null => Err(SimclassError::Unrepresentable("null".to_string())),
        serde_json::Value::Bool(b) => Ok(Value::Boolean(*b)),
        serde_json::Value::Number(n) => Ok(number_from_json(n)),
        serde_json::Value::String(s) => Ok(Value::String(s.clone())),
        serde_json::Value::Array(items) => Ok(Value::Array(
            items
                .iter()
                .map(|item| value_from_json(item, true))
                .collect::<Result<Vec<_>>>()?,
        )),
        serde_json::Value::Object(_) if inside_array => Err(SimclassError::Unrepresentable(
            "an object inside an array".to_string(),
        )),
        serde_json::Value::Object(_) => Ok(Value::Class(from_json(value)?)),
    }
}

/// Parse a JSON string and convert it to a document.
///
/// Convenience for callers holding JSON text rather than a parsed value.
pub fn from_json_str(s: &str) -> Result<Document> {
    let value: serde_json::Value = serde_json::from_str(s)?;
    from_json(&value)
}

fn number_from_json(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Integer(i)
    } else {
        // u64-only and fractional numbers both land here.
        Value::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => items.serialize(serializer),
            Value::Class(doc) => doc.serialize(serializer),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
