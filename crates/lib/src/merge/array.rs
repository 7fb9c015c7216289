//! Reconciliation of array-valued document fields.
//!
//! Two disjoint merge modes exist, decided by the patch array's contents:
//! identity-keyed reconciliation of sub-documents, or wholesale replacement
//! when the patch carries primitive elements. A separate deep variant lets
//! the patch decide membership while merging matched items field-by-field,
//! which is what media-array updates use.

use tracing::warn;

use crate::merge::{
    MergeError,
    value::{Map, ObjectExt, Value},
};

/// What to do with an identity-keyed patch item that matches nothing.
///
/// The stored array may have no item under the patch item's `_id`. Silently
/// dropping such items loses data without a trace, so the behavior is an
/// explicit choice made by each update path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedPolicy {
    /// Drop the unmatched item, logging the lost identity at warn level.
    #[default]
    Discard,
    /// Append the unmatched item as a new entry.
    Insert,
    /// Fail the merge with [`MergeError::UnmatchedIdentity`].
    Reject,
}

/// Reconciles a patch array against a stored array, producing a new array.
///
/// Mode selection inspects the patch elements:
/// - **Replace mode**: if any element is a string or a number, the result
///   is exactly the patch's primitive elements and all stored content is
///   discarded. Replace mode is mutually exclusive with identity mode.
/// - **Identity mode** (no primitives present): object items carrying an
///   `_id` either delete the matching stored item (truthy `isDeleted`) or
///   replace it in place; items with an `_id` that matches nothing follow
///   `policy`. Object items without an `_id` append at the end.
/// - Booleans, nulls, and nested arrays neither trigger replace mode nor
///   carry identity; they append.
///
/// An empty patch array is a no-op: the stored array is returned unchanged.
/// Items keep the position of whichever collection contributed them;
/// appends go at the end.
pub fn merge_array(
    current: &[Value],
    incoming: &[Value],
    policy: UnmatchedPolicy,
) -> Result<Vec<Value>, MergeError> {
    if incoming.is_empty() {
        return Ok(current.to_vec());
    }

    // A single primitive anywhere in the patch switches the whole merge to
    // replace mode, so scan before reconciling.
    if incoming.iter().any(Value::is_replace_primitive) {
        return Ok(incoming
            .iter()
            .filter(|item| item.is_replace_primitive())
            .cloned()
            .collect());
    }

    let mut merged = current.to_vec();
    for item in incoming {
        match item {
            Value::Object(obj) => match obj.identity() {
                Some(id) => {
                    if obj.is_marked_deleted() {
                        merged.retain(|doc| item_identity(doc) != Some(id));
                    } else if let Some(slot) = merged
                        .iter_mut()
                        .find(|doc| item_identity(doc) == Some(id))
                    {
                        *slot = item.clone();
                    } else {
                        match policy {
                            UnmatchedPolicy::Discard => {
                                warn!(identity = %id, "discarding unmatched array item");
                            }
                            UnmatchedPolicy::Insert => merged.push(item.clone()),
                            UnmatchedPolicy::Reject => {
                                return Err(MergeError::UnmatchedIdentity { id: id.to_string() });
                            }
                        }
                    }
                }
                None => merged.push(item.clone()),
            },
            other => merged.push(other.clone()),
        }
    }

    Ok(merged)
}

/// Deep reconciliation: the patch array decides membership.
///
/// For each stored item with a matching patch item (by `_id`), the two are
/// merged field-by-field: nested objects merge recursively and nested
/// arrays reconcile the same way. Patch items with no stored counterpart
/// are appended. Stored items absent from the patch are dropped, which is
/// the intended semantic for media arrays: the patch is the authoritative
/// set, matched entries keep fields the patch did not mention.
///
/// Items without an `_id` on either side pass through membership checks as
/// never-matching and are kept only when they come from the patch.
pub fn reconcile_array(current: &[Value], incoming: &[Value]) -> Result<Vec<Value>, MergeError> {
    let mut reconciled = Vec::with_capacity(incoming.len());

    for doc in current {
        let matching = item_identity(doc).and_then(|id| {
            incoming
                .iter()
                .find(|item| item_identity(item) == Some(id))
        });
        if let Some(patch) = matching {
            reconciled.push(reconcile_item(doc, patch)?);
        }
        // No match: the patch dropped this item.
    }

    for item in incoming {
        let already_present = item_identity(item)
            .is_some_and(|id| reconciled.iter().any(|doc| item_identity(doc) == Some(id)));
        if !already_present {
            reconciled.push(item.clone());
        }
    }

    Ok(reconciled)
}

/// Field-wise merge of one matched pair during deep reconciliation.
fn reconcile_item(current: &Value, incoming: &Value) -> Result<Value, MergeError> {
    match (current, incoming) {
        (Value::Object(cur), Value::Object(inc)) => Ok(Value::Object(reconcile_fields(cur, inc)?)),
        _ => Ok(incoming.clone()),
    }
}

fn reconcile_fields(current: &Map, incoming: &Map) -> Result<Map, MergeError> {
    let mut merged = current.clone();
    for (key, patch) in incoming {
        let value = match (current.get(key), patch) {
            (Some(Value::Object(base)), Value::Object(patch_obj)) => {
                Value::Object(reconcile_fields(base, patch_obj)?)
            }
            (Some(Value::Array(base)), Value::Array(items)) => {
                Value::Array(reconcile_array(base, items)?)
            }
            _ => patch.clone(),
        };
        merged.insert(key.clone(), value);
    }
    Ok(merged)
}

fn item_identity(value: &Value) -> Option<&str> {
    value.as_object().and_then(Map::identity)
}
