//! Recursive merge of a nested object field.
//!
//! Implements the scalar/object half of the merge engine: a patch object is
//! folded into the stored object field-by-field, honoring the `isDeleted`
//! marker and delegating array-valued fields to array reconciliation.

use crate::merge::{
    MergeError, UnmatchedPolicy,
    array::merge_array,
    value::{Map, ObjectExt, Value},
};

/// Merges a patch object into a stored object, producing a new object.
///
/// Rules, in order:
/// - A truthy `isDeleted` on the patch clears the field: the result is an
///   empty object regardless of the stored content.
/// - A nested object in the patch merges recursively against the stored
///   value under the same key (an absent or non-object stored value merges
///   against an empty object).
/// - A non-empty array in the patch is reconciled against the stored array
///   under the same key (absent or non-array stored values reconcile
///   against an empty array).
/// - Anything else (scalar, null, or empty array) overwrites directly.
///
/// Keys present only in the stored object are preserved unchanged. The
/// stored object is never mutated; the merged result is a fresh value.
pub fn merge_object(
    current: &Map,
    incoming: &Map,
    policy: UnmatchedPolicy,
) -> Result<Map, MergeError> {
    if incoming.is_marked_deleted() {
        return Ok(Map::new());
    }

    let mut merged = current.clone();
    for (key, patch) in incoming {
        let value = match patch {
            Value::Object(patch_obj) => {
                let base = current
                    .get(key)
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                Value::Object(merge_object(&base, patch_obj, policy)?)
            }
            Value::Array(items) if !items.is_empty() => {
                let base = current
                    .get(key)
                    .and_then(Value::as_array)
                    .map(<[Value]>::to_vec)
                    .unwrap_or_default();
                Value::Array(merge_array(&base, items, policy)?)
            }
            other => other.clone(),
        };
        merged.insert(key.clone(), value);
    }

    Ok(merged)
}

/// Merges two values that are both expected to be objects.
///
/// Entry point for callers holding [`Value`]s rather than maps; fails fast
/// when either side is not an object.
pub fn merge_object_values(
    current: &Value,
    incoming: &Value,
    policy: UnmatchedPolicy,
) -> Result<Value, MergeError> {
    let current = current.as_object().ok_or_else(|| MergeError::NotAnObject {
        actual: current.type_name().to_string(),
    })?;
    let incoming = incoming.as_object().ok_or_else(|| MergeError::NotAnObject {
        actual: incoming.type_name().to_string(),
    })?;
    Ok(Value::Object(merge_object(current, incoming, policy)?))
}
