//! Value types for mergeable documents.
//!
//! This module provides the Value enum that represents all data reachable
//! from a stored document: scalars, nested objects, and arrays of either.
//! Values convert losslessly to and from [`serde_json::Value`], which is the
//! raw representation the store persists.

use std::collections::BTreeMap;
use std::fmt;

use crate::merge::MergeError;

/// Field name carrying a sub-document's identity within an array.
pub const ID_KEY: &str = "_id";

/// Field name carrying the deletion marker on objects and array items.
pub const DELETED_KEY: &str = "isDeleted";

/// Key-ordered map used for object fields.
///
/// A `BTreeMap` keeps merge output deterministic regardless of the order
/// the patch fields arrived in.
pub type Map = BTreeMap<String, Value>;

/// Values that can appear in a mergeable document.
///
/// `Value` is an explicit tagged union so that merge dispatch is a single
/// exhaustive match instead of repeated runtime type probing. Arrays are
/// classified at merge time (identity vs. replace mode, see
/// [`merge_array`](crate::merge::merge_array)) rather than carrying a
/// separate variant per element shape, since a patch array's mode depends
/// on its contents.
///
/// # Merge semantics
///
/// - **Scalars** (`Null`, `Bool`, `Int`, `Float`, `Text`): overwrite.
/// - **Objects**: recursive field-wise merge; a truthy `isDeleted` field
///   collapses the object to empty.
/// - **Arrays**: identity-keyed reconciliation or wholesale replacement.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// Text string value
    Text(String),
    /// Nested object
    Object(Map),
    /// Array of values
    Array(Vec<Value>),
}

impl Value {
    /// Returns true if this is a scalar (non-container) value.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Text(_)
        )
    }

    /// Returns true if this is a replace-mode primitive.
    ///
    /// Only strings and numbers trigger wholesale array replacement;
    /// booleans and nulls do not.
    pub fn is_replace_primitive(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Text(_))
    }

    /// Returns the type name as a string, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
        }
    }

    /// Attempts to view this value as an object.
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Attempts to view this value as an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to view this value as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Converts into an object map, failing with a structured error otherwise.
    ///
    /// Used at merge entry points where a non-object input is a precondition
    /// violation rather than something to silently coerce.
    pub fn into_object(self) -> Result<Map, MergeError> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(MergeError::NotAnObject {
                actual: other.type_name().to_string(),
            }),
        }
    }
}

/// Identity and deletion-marker accessors for object maps.
pub trait ObjectExt {
    /// The item's identity key (`_id`), if present and textual.
    fn identity(&self) -> Option<&str>;

    /// True when the object carries a truthy deletion marker.
    fn is_marked_deleted(&self) -> bool;
}

impl ObjectExt for Map {
    fn identity(&self) -> Option<&str> {
        self.get(ID_KEY).and_then(Value::as_text)
    }

    fn is_marked_deleted(&self) -> bool {
        matches!(self.get(DELETED_KEY), Some(Value::Bool(true)))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Object(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                // Integral JSON numbers stay integers through a round-trip.
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(n) => serde_json::Value::Number(n.into()),
            Value::Float(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s),
            Value::Object(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
            Value::Array(items) => serde_json::Value::Array(
                items.into_iter().map(serde_json::Value::from).collect(),
            ),
        }
    }
}
