//! Edit session: tracks the create/edit form in progress for one store.

use fabdesk_core::ServiceError;
use serde_json::{Map, Value};

use crate::entity::Entity;

/// Where the form is.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState<T> {
    Closed,
    Creating,
    /// Holds the snapshot of the record taken when editing began.
    Editing(T),
}

/// Transient form state: which record is being created or edited, plus the
/// staged field values keyed by JSON field name.
#[derive(Debug, Clone)]
pub struct EditSession<T: Entity> {
    state: SessionState<T>,
    staged: Map<String, Value>,
}

impl<T: Entity> Default for EditSession<T> {
    fn default() -> Self {
        Self {
            state: SessionState::Closed,
            staged: Map::new(),
        }
    }
}

impl<T: Entity> EditSession<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a create form with nothing staged.
    pub fn open_create(&mut self) {
        self.state = SessionState::Creating;
        self.staged.clear();
    }

    /// Start editing `record`. The staged values are seeded from a snapshot
    /// of it, so later changes to the store do not leak into the form.
    pub fn open_edit(&mut self, record: &T) -> Result<(), ServiceError> {
        let staged = match serde_json::to_value(record) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(ServiceError::Internal(format!(
                    "{} does not serialize to an object",
                    T::LABEL
                )));
            }
            Err(e) => return Err(ServiceError::Internal(format!("serialize {}: {}", T::LABEL, e))),
        };
        self.state = SessionState::Editing(record.clone());
        self.staged = staged;
        Ok(())
    }

    /// Write one staged form value.
    pub fn stage(&mut self, field: &str, value: impl Into<Value>) -> Result<(), ServiceError> {
        if !self.is_open() {
            return Err(ServiceError::InvalidState(format!(
                "no {} form is open; cannot stage '{}'",
                T::LABEL,
                field
            )));
        }
        self.staged.insert(field.to_string(), value.into());
        Ok(())
    }

    /// Stage every key of a JSON object.
    pub fn stage_all(&mut self, values: &Map<String, Value>) -> Result<(), ServiceError> {
        for (k, v) in values {
            self.stage(k, v.clone())?;
        }
        Ok(())
    }

    pub fn state(&self) -> &SessionState<T> {
        &self.state
    }

    pub fn staged(&self) -> &Map<String, Value> {
        &self.staged
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, SessionState::Closed)
    }

    /// Id of the record under edit, if editing.
    pub fn editing_id(&self) -> Option<u64> {
        match &self.state {
            SessionState::Editing(r) => Some(r.id()),
            _ => None,
        }
    }

    /// Abandon the form.
    pub fn cancel(&mut self) {
        self.state = SessionState::Closed;
        self.staged.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{Part, part};
    use serde_json::json;

    #[test]
    fn starts_closed_and_rejects_staging() {
        let mut s = EditSession::<Part>::new();
        assert_eq!(s.state(), &SessionState::Closed);
        let err = s.stage("name", "x").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_STATE");
    }

    #[test]
    fn create_starts_empty() {
        let mut s = EditSession::<Part>::new();
        s.open_create();
        s.stage("name", "Hinge").unwrap();
        s.open_create();
        assert!(s.staged().is_empty());
        assert_eq!(s.state(), &SessionState::Creating);
    }

    #[test]
    fn edit_seeds_from_snapshot() {
        let mut record = part(3, "Gasket");
        let mut s = EditSession::new();
        s.open_edit(&record).unwrap();
        record.name = "changed after open".into();

        assert_eq!(s.staged()["name"], json!("Gasket"));
        assert_eq!(s.editing_id(), Some(3));
        match s.state() {
            SessionState::Editing(snap) => assert_eq!(snap.name, "Gasket"),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn cancel_closes() {
        let mut s = EditSession::new();
        s.open_edit(&part(1, "A")).unwrap();
        s.cancel();
        assert!(!s.is_open());
        assert!(s.staged().is_empty());
    }
}
