//! `createdAt`/`updatedAt` stamping of serialized records.
//!
//! Both helpers work on the JSON object a commit is about to decode, so the
//! stamps are owned by the commit path and never by staged form input.

use fabdesk_core::{now_rfc3339, stamp_after};
use serde_json::{Map, Value};

/// Stamp a new record: `createdAt == updatedAt == now`.
pub(crate) fn stamp_create(obj: &mut Map<String, Value>) {
    let now = now_rfc3339();
    obj.insert("createdAt".into(), Value::String(now.clone()));
    obj.insert("updatedAt".into(), Value::String(now));
}

/// Stamp an edited record. `createdAt` is restored from the original, and
/// `updatedAt` is strictly later than both previous stamps.
pub(crate) fn stamp_update(obj: &mut Map<String, Value>, created_at: &str, updated_at: &str) {
    let next = stamp_after(&[created_at, updated_at]);
    obj.insert("createdAt".into(), Value::String(created_at.to_string()));
    obj.insert("updatedAt".into(), Value::String(next));
}
