//! Contains the `JsonValue` enum, a native Rust representation of any
//! materialized JSON value.

use crate::error::Result;
use indexmap::IndexMap;

/// An insertion-ordered mapping with unique keys.
pub type Mapping = IndexMap<String, JsonValue>;

/// An ordered sequence of values.
pub type Sequence = Vec<JsonValue>;

/// A native Rust representation of any valid JSON value.
///
/// Numbers are always 64-bit floats. Strings hold the raw text found
/// between the quotes; escape sequences are not decoded.
#[derive(Debug, PartialEq, Clone, Default)]
pub enum JsonValue {
    /// Represents a JSON `null`.
    #[default]
    Null,
    /// Represents a JSON `true` or `false`.
    Boolean(bool),
    /// Represents a JSON number.
    Number(f64),
    /// Represents a JSON string.
    String(String),
    /// Represents a JSON array (list).
    Array(Sequence),
    /// Represents a JSON object (map).
    Object(Mapping),
}

impl JsonValue {
    /// Parses a JSON document into a `JsonValue` with the default `Limits`.
    ///
    /// The root is always an `Object` or an `Array`.
    ///
    /// # Errors
    /// Returns the first lexical or syntax error in the input.
    pub fn parse(input: &str) -> Result<JsonValue> {
        crate::from_str(input)
    }

    /// Returns `true` if the value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Returns `true` if the value is a `Boolean`.
    pub fn is_boolean(&self) -> bool {
        matches!(self, JsonValue::Boolean(_))
    }

    /// Returns `true` if the value is a `Number`.
    pub fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    /// Returns `true` if the value is a `String`.
    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    /// Returns `true` if the value is an `Array`.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns `true` if the value is an `Object`.
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// The boolean, if this is a `Boolean`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The number, if this is a `Number`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The raw string, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The elements, if this is an `Array`.
    pub fn as_array(&self) -> Option<&Sequence> {
        match self {
            JsonValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The members, if this is an `Object`.
    pub fn as_object(&self) -> Option<&Mapping> {
        match self {
            JsonValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get a value from an object by key.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Get a value from an array by index.
    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        self.as_array().and_then(|arr| arr.get(index))
    }

    /// Returns the type name as a string for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Boolean(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }
}

impl From<Mapping> for JsonValue {
    fn from(map: Mapping) -> Self {
        JsonValue::Object(map)
    }
}

impl From<Sequence> for JsonValue {
    fn from(seq: Sequence) -> Self {
        JsonValue::Array(seq)
    }
}
