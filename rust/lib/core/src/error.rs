use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Front ends match on these,
// never on the human-readable message string.

/// Stable error code constants.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const REFERENCE_VIOLATION: &str = "REFERENCE_VIOLATION";
    pub const INVALID_STATE: &str = "INVALID_STATE";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified error type for every registry operation.
///
/// Each variant maps to a stable error code (see [`error_code`]).
/// `Display` is only the message, e.g. `customer 7 not found`.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Duplicate id.
    #[error("{0}")]
    Conflict(String),

    /// A required field is missing or a value failed type coercion.
    #[error("{0}")]
    Validation(String),

    /// A foreign key points at a missing record, or a delete would orphan children.
    #[error("{0}")]
    Reference(String),

    /// Operation not allowed in the current edit-session state.
    #[error("{0}")]
    InvalidState(String),

    /// Durable storage failure.
    #[error("{0}")]
    Storage(String),

    /// Unexpected internal error (serialization and the like).
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Conflict(_) => error_code::ALREADY_EXISTS,
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::Reference(_) => error_code::REFERENCE_VIOLATION,
            ServiceError::InvalidState(_) => error_code::INVALID_STATE,
            ServiceError::Storage(_) => error_code::STORAGE_ERROR,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// Whether the caller can fix the problem by changing its input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ServiceError::NotFound(_)
                | ServiceError::Conflict(_)
                | ServiceError::Validation(_)
                | ServiceError::Reference(_)
                | ServiceError::InvalidState(_)
        )
    }

    /// JSON body `{"code": ..., "message": ...}` for machine-readable output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_mapping() {
        assert_eq!(ServiceError::NotFound("x".into()).error_code(), "NOT_FOUND");
        assert_eq!(ServiceError::Conflict("x".into()).error_code(), "ALREADY_EXISTS");
        assert_eq!(ServiceError::Validation("x".into()).error_code(), "VALIDATION_FAILED");
        assert_eq!(ServiceError::Reference("x".into()).error_code(), "REFERENCE_VIOLATION");
        assert_eq!(ServiceError::InvalidState("x".into()).error_code(), "INVALID_STATE");
        assert_eq!(ServiceError::Storage("x".into()).error_code(), "STORAGE_ERROR");
        assert_eq!(ServiceError::Internal("x".into()).error_code(), "INTERNAL");
    }

    #[test]
    fn display_is_just_message() {
        assert_eq!(ServiceError::NotFound("customer 3".into()).to_string(), "customer 3");
        assert_eq!(ServiceError::Validation("amount: not a number".into()).to_string(), "amount: not a number");
    }

    #[test]
    fn user_errors() {
        assert!(ServiceError::Validation("x".into()).is_user_error());
        assert!(ServiceError::Reference("x".into()).is_user_error());
        assert!(!ServiceError::Storage("x".into()).is_user_error());
        assert!(!ServiceError::Internal("x".into()).is_user_error());
    }

    #[test]
    fn json_body() {
        let body = ServiceError::NotFound("supplier 9 not found".into()).to_json();
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["message"], "supplier 9 not found");
    }
}
