//! Document-level merge orchestration.
//!
//! The orchestrator is what every resource's update path calls: it walks
//! the top-level fields of a validated patch, dispatches each field to the
//! object or array merge by shape, and stamps audit metadata onto the
//! result before the caller persists it as one atomic write.

use crate::clock::Clock;
use crate::merge::{
    MergeError, UnmatchedPolicy,
    array::reconcile_array,
    object::merge_object,
    value::{Map, Value},
};

/// Audit field stamped with the updating identity.
pub const UPDATED_BY_KEY: &str = "uBy";

/// Audit field stamped with the update time (millis since epoch).
pub const UPDATED_AT_KEY: &str = "uTime";

/// Per-call merge configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions<'a> {
    /// Policy for identity-keyed patch items that match nothing.
    pub unmatched: UnmatchedPolicy,
    /// Top-level array fields that use deep reconciliation (the patch
    /// decides membership, matched items merge field-wise) instead of the
    /// ordinary array merge. Product images are the canonical case.
    pub deep_fields: &'a [&'a str],
}

impl<'a> MergeOptions<'a> {
    /// Options that append unmatched identity items instead of dropping them.
    pub fn inserting() -> Self {
        Self {
            unmatched: UnmatchedPolicy::Insert,
            ..Self::default()
        }
    }

    /// Options that fail the merge on unmatched identity items.
    pub fn strict() -> Self {
        Self {
            unmatched: UnmatchedPolicy::Reject,
            ..Self::default()
        }
    }

    /// Routes the named top-level array fields through deep reconciliation.
    pub fn with_deep_fields(mut self, fields: &'a [&'a str]) -> Self {
        self.deep_fields = fields;
        self
    }
}

/// Merges a partial patch into a stored document, producing the document to
/// persist.
///
/// For each top-level field of `incoming`:
/// - fields named in [`MergeOptions::deep_fields`] holding arrays go
///   through [`reconcile_array`],
/// - nested objects route through [`merge_object`],
/// - non-empty arrays route through the ordinary array merge,
/// - everything else overwrites directly.
///
/// The result is then stamped with `uBy` (the caller's authenticated
/// identity) and `uTime` (from `clock`), both visible to the persistence
/// layer. The stored document is read-only input; on error nothing is
/// partially applied.
pub fn merge_document(
    current: &Map,
    incoming: &Map,
    updated_by: &str,
    clock: &dyn Clock,
    options: MergeOptions<'_>,
) -> Result<Map, MergeError> {
    // Deep-reconciled fields bypass the ordinary dispatch entirely: their
    // membership is decided by the patch, so they must land as direct
    // overwrites rather than re-merging against the stored array.
    let mut patch = incoming.clone();
    let mut reconciled = Vec::new();
    for field in options.deep_fields {
        if let Some(Value::Array(items)) = patch.remove(*field) {
            let base = current
                .get(*field)
                .and_then(Value::as_array)
                .map(<[Value]>::to_vec)
                .unwrap_or_default();
            reconciled.push((field.to_string(), reconcile_array(&base, &items)?));
        }
    }

    let mut merged = merge_object(current, &patch, options.unmatched)?;
    for (field, items) in reconciled {
        merged.insert(field, Value::Array(items));
    }

    merged.insert(
        UPDATED_BY_KEY.to_string(),
        Value::Text(updated_by.to_string()),
    );
    merged.insert(
        UPDATED_AT_KEY.to_string(),
        Value::Int(clock.now_millis() as i64),
    );

    Ok(merged)
}

/// Merges two serde-serializable representations through the engine.
///
/// Convenience wrapper for typed services: serializes both sides to the
/// [`Value`] model, merges, stamps audit metadata, and deserializes back
/// into the document type. A side that does not serialize to an object is
/// a precondition violation, surfaced as [`MergeError::NotAnObject`].
pub fn merge_typed<T, P>(
    current: &T,
    patch: &P,
    updated_by: &str,
    clock: &dyn Clock,
    options: MergeOptions<'_>,
) -> Result<T, crate::Error>
where
    T: serde::Serialize + serde::de::DeserializeOwned,
    P: serde::Serialize,
{
    let current = Value::from(serde_json::to_value(current)?).into_object()?;
    let patch = Value::from(serde_json::to_value(patch)?).into_object()?;

    let merged = merge_document(&current, &patch, updated_by, clock, options)?;

    Ok(serde_json::from_value(serde_json::Value::from(
        Value::Object(merged),
    ))?)
}
