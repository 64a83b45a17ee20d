//! Commit and delete: the only paths that mutate an entity store.

use fabdesk_core::ServiceError;
use serde_json::{Map, Value};
use tracing::debug;

use crate::entity::Entity;
use crate::field::is_blank;
use crate::refs::ReferenceCheck;
use crate::session::{EditSession, SessionState};
use crate::stamp::{stamp_create, stamp_update};
use crate::store::EntityStore;

/// Keys the commit path owns. Staged values for them are ignored.
const PROTECTED: &[&str] = &["id", "createdAt", "updatedAt"];

/// Apply the open session to `store`.
///
/// Creating: the record gets the sequence's next id and fresh stamps, and is
/// appended. Editing: staged values are merged over the stored record by
/// field name, `updatedAt` moves strictly forward, and the entry with the
/// same id is replaced.
///
/// On any error the store is untouched and the session stays open. On
/// success the session is closed and the store asked to persist.
pub fn commit<T: Entity>(
    store: &mut EntityStore<T>,
    session: &mut EditSession<T>,
    refs: &dyn ReferenceCheck,
) -> Result<T, ServiceError> {
    let (mut obj, editing) = match session.state() {
        SessionState::Closed => {
            return Err(ServiceError::InvalidState(format!(
                "no {} form is open",
                T::LABEL
            )));
        }
        SessionState::Creating => (Map::new(), None),
        SessionState::Editing(snapshot) => {
            let current = store.get_or_err(snapshot.id())?;
            let obj = match serde_json::to_value(current) {
                Ok(Value::Object(map)) => map,
                _ => {
                    return Err(ServiceError::Internal(format!(
                        "serialize {} {}",
                        T::LABEL,
                        snapshot.id()
                    )));
                }
            };
            let stamps = (current.created_at().to_string(), current.updated_at().to_string());
            (obj, Some((snapshot.id(), stamps)))
        }
    };

    for (key, value) in session.staged() {
        if !PROTECTED.contains(&key.as_str()) {
            obj.insert(key.clone(), value.clone());
        }
    }

    validate_fields::<T>(&mut obj)?;

    let id = match &editing {
        Some((id, (created_at, updated_at))) => {
            stamp_update(&mut obj, created_at, updated_at);
            *id
        }
        None => {
            stamp_create(&mut obj);
            store.next_id()
        }
    };
    obj.insert("id".into(), Value::from(id));

    let mut record: T = serde_json::from_value(Value::Object(obj))
        .map_err(|e| ServiceError::Validation(format!("{}: {}", T::LABEL, e)))?;
    record.normalize();

    check_references(&record, refs)?;

    let mut next = store.load().to_vec();
    match editing {
        Some(_) => {
            for slot in next.iter_mut().filter(|r| r.id() == id) {
                *slot = record.clone();
            }
            debug!("{} {} updated", T::LABEL, id);
        }
        None => {
            next.push(record.clone());
            debug!("{} {} created", T::LABEL, id);
        }
    }
    store.replace(next);
    store.persist();
    session.cancel();
    Ok(record)
}

/// Remove the record with `id`. Every other record is left as it was.
pub fn delete<T: Entity>(store: &mut EntityStore<T>, id: u64) -> Result<T, ServiceError> {
    let removed = store.get_or_err(id)?.clone();
    let next: Vec<T> = store.load().iter().filter(|r| r.id() != id).cloned().collect();
    store.replace(next);
    store.persist();
    debug!("{} {} deleted", T::LABEL, id);
    Ok(removed)
}

/// Presence and type coercion of every declared field, in place.
///
/// Blank optional fields are dropped so the record's own default applies.
/// All failing fields are reported together.
fn validate_fields<T: Entity>(obj: &mut Map<String, Value>) -> Result<(), ServiceError> {
    let mut problems = Vec::new();
    for field in T::FIELDS {
        let raw = obj.get(field.name).cloned().unwrap_or(Value::Null);
        if is_blank(&raw) {
            if field.required {
                problems.push(format!("{}: required", field.name));
            } else {
                obj.remove(field.name);
            }
            continue;
        }
        match field.coerce(&raw) {
            Ok(v) => {
                obj.insert(field.name.to_string(), v);
            }
            Err(reason) => problems.push(format!("{}: {}", field.name, reason)),
        }
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(format!(
            "invalid {}: {}",
            T::LABEL,
            problems.join("; ")
        )))
    }
}

fn check_references<T: Entity>(record: &T, refs: &dyn ReferenceCheck) -> Result<(), ServiceError> {
    let missing: Vec<String> = record
        .references()
        .into_iter()
        .filter(|r| !refs.exists(r.collection, r.id))
        .map(|r| format!("{} {}", r.collection, r.id))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Reference(format!(
            "{} refers to missing records: {}",
            T::LABEL,
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refs::{IdIndex, NoReferences};
    use crate::testkit::{Part, part};
    use fabdesk_core::parse_stamp;
    use serde_json::json;

    fn store() -> EntityStore<Part> {
        EntityStore::in_memory(vec![part(1, "Anchor"), part(2, "Bracket")]).unwrap()
    }

    fn create(store: &mut EntityStore<Part>, fields: Value) -> Result<Part, ServiceError> {
        let mut s = EditSession::new();
        s.open_create();
        s.stage_all(fields.as_object().unwrap()).unwrap();
        commit(store, &mut s, &NoReferences)
    }

    #[test]
    fn create_appends_with_fresh_id() {
        let mut store = store();
        let before: Vec<u64> = store.load().iter().map(|p| p.id).collect();
        let p = create(&mut store, json!({"name": "Gasket", "price": "12.5", "status": "Active"})).unwrap();

        assert_eq!(store.len(), 3);
        assert!(!before.contains(&p.id));
        assert_eq!(p.id, 3);
        assert_eq!(p.price, 12.5);
        assert_eq!(p.status, "active");
        assert_eq!(p.created_at, p.updated_at);
        assert_eq!(store.load().last().unwrap(), &p);
    }

    #[test]
    fn staged_id_and_stamps_are_ignored() {
        let mut store = store();
        let p = create(
            &mut store,
            json!({"id": 1, "createdAt": "1999-01-01", "name": "Gasket", "price": 1, "status": "active"}),
        )
        .unwrap();
        assert_eq!(p.id, 3);
        assert_ne!(p.created_at, "1999-01-01");
    }

    #[test]
    fn missing_required_field_keeps_session_open() {
        let mut store = store();
        let mut s = EditSession::new();
        s.open_create();
        s.stage("name", "Gasket").unwrap();
        s.stage("price", "cheap").unwrap();

        let err = commit(&mut store, &mut s, &NoReferences).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        let msg = err.to_string();
        assert!(msg.contains("price"), "{}", msg);
        assert!(msg.contains("status: required"), "{}", msg);
        assert!(s.is_open());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn edit_merges_over_stored_record() {
        let mut store = store();
        let mut s = EditSession::new();
        s.open_edit(store.get(2).unwrap()).unwrap();
        s.stage("vendor", "Acme").unwrap();
        s.stage("id", 99).unwrap();
        s.stage("createdAt", "2000-01-01").unwrap();

        let p = commit(&mut store, &mut s, &NoReferences).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(p.id, 2);
        assert_eq!(p.name, "Bracket");
        assert_eq!(p.vendor, "Acme");
        assert_eq!(p.created_at, "2024-01-15T00:00:00.000000Z");
        assert!(parse_stamp(&p.updated_at).unwrap() > parse_stamp(&p.created_at).unwrap());
        assert_eq!(store.get(2).unwrap(), &p);
        assert!(!s.is_open());
    }

    #[test]
    fn blank_optional_field_is_cleared() {
        let mut store = store();
        let mut s = EditSession::new();
        s.open_edit(store.get(1).unwrap()).unwrap();
        s.stage("received", "2024-05-01").unwrap();
        let p = commit(&mut store, &mut s, &NoReferences).unwrap();
        assert_eq!(p.received.as_deref(), Some("2024-05-01"));

        s.open_edit(&p).unwrap();
        s.stage("received", "").unwrap();
        let p = commit(&mut store, &mut s, &NoReferences).unwrap();
        assert_eq!(p.received, None);
    }

    #[test]
    fn edit_of_deleted_record_is_not_found() {
        let mut store = store();
        let mut s = EditSession::new();
        s.open_edit(store.get(1).unwrap()).unwrap();
        delete(&mut store, 1).unwrap();
        assert_eq!(commit(&mut store, &mut s, &NoReferences).unwrap_err().error_code(), "NOT_FOUND");
    }

    #[test]
    fn commit_while_closed_is_invalid() {
        let mut store = store();
        let mut s = EditSession::new();
        assert_eq!(commit(&mut store, &mut s, &NoReferences).unwrap_err().error_code(), "INVALID_STATE");
    }

    #[test]
    fn dangling_reference_rejected() {
        let mut store = store();
        let index = IdIndex::new();
        let mut s = EditSession::new();
        s.open_create();
        s.stage_all(json!({"name": "Gasket", "price": 1, "status": "active", "binId": "7"}).as_object().unwrap())
            .unwrap();
        let err = commit(&mut store, &mut s, &index).unwrap_err();
        assert_eq!(err.error_code(), "REFERENCE_VIOLATION");
        assert!(err.to_string().contains("bins 7"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut store = store();
        let keep = serde_json::to_string(store.get(2).unwrap()).unwrap();
        let removed = delete(&mut store, 1).unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(serde_json::to_string(store.get(2).unwrap()).unwrap(), keep);
        assert_eq!(delete(&mut store, 1).unwrap_err().error_code(), "NOT_FOUND");
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let mut store = store();
        delete(&mut store, 2).unwrap();
        let p = create(&mut store, json!({"name": "Gasket", "price": 1, "status": "active"})).unwrap();
        assert_eq!(p.id, 3);
    }
}
