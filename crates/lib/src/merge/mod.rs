//! Partial-update reconciliation for nested documents.
//!
//! Every resource's update path accepts a partial payload that must be
//! merged into the previously stored document rather than replacing it
//! outright. This module is that merge engine:
//!
//! - [`merge_object`]: folds a patch object into a stored sub-object,
//!   honoring the `isDeleted` marker.
//! - [`merge_array`] / [`reconcile_array`]: reconciles arrays of
//!   identity-keyed sub-documents, with wholesale replacement when the
//!   patch carries primitives.
//! - [`merge_document`]: the orchestrator. Walks a patch's top-level
//!   fields, dispatches by shape, and stamps `uBy`/`uTime` audit metadata.
//!
//! The engine is pure, synchronous, and never persists anything: callers
//! fetch the stored document, merge, and apply the result as one atomic
//! write. The stored side is read-only input; merging always constructs a
//! new value, so no partial mutation is observable on error paths.

pub mod array;
pub mod document;
pub mod errors;
pub mod object;
pub mod value;


pub use array::{UnmatchedPolicy, merge_array, reconcile_array};
pub use document::{MergeOptions, UPDATED_AT_KEY, UPDATED_BY_KEY, merge_document, merge_typed};
pub use errors::MergeError;
pub use object::{merge_object, merge_object_values};
pub use value::{DELETED_KEY, ID_KEY, Map, ObjectExt, Value};
