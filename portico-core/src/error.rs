use thiserror::Error;

/// Message returned to callers in place of any storage-level detail.
pub const STORAGE_FAULT_MESSAGE: &str = "Database operation failed. Please try again.";

/// Unified error type for Portico.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PorticoError {
    /// Entity absent or soft-deleted. Carries the entity label ("Domain", "Plugin service", ...).
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Unique constraint violated.
    #[error("{0}")]
    Conflict(String),

    /// A referenced entity does not exist.
    #[error("{0}")]
    InvalidReference(String),

    /// Delete blocked by live dependents.
    #[error("{0}")]
    ReferentialIntegrity(String),

    /// Input failed field constraints.
    #[error("{0}")]
    Validation(String),

    /// Underlying storage unavailable or errored.
    #[error("storage fault: {0}")]
    StorageFault(String),
}

pub type Result<T, E = PorticoError> = std::result::Result<T, E>;

impl PorticoError {
    /// Wrap a lower-level failure as a storage fault, keeping the cause for logs.
    pub fn storage(context: &str, err: impl std::fmt::Display) -> Self {
        PorticoError::StorageFault(format!("{context}: {err}"))
    }

    /// Map to HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            PorticoError::Validation(_) | PorticoError::InvalidReference(_) => 400,
            PorticoError::NotFound(_) => 404,
            PorticoError::Conflict(_) | PorticoError::ReferentialIntegrity(_) => 409,
            PorticoError::StorageFault(_) => 500,
        }
    }

    /// Human-readable message safe to show to API callers.
    ///
    /// Storage faults never leak their cause.
    pub fn public_message(&self) -> String {
        match self {
            PorticoError::StorageFault(_) => STORAGE_FAULT_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// JSON error body: `{"error": "..."}`.
    pub fn to_json_body(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.public_message() })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, PorticoError::Conflict(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(PorticoError::Validation("x".into()).status_code(), 400);
        assert_eq!(PorticoError::InvalidReference("x".into()).status_code(), 400);
        assert_eq!(PorticoError::NotFound("Domain").status_code(), 404);
        assert_eq!(PorticoError::Conflict("x".into()).status_code(), 409);
        assert_eq!(PorticoError::ReferentialIntegrity("x".into()).status_code(), 409);
        assert_eq!(PorticoError::StorageFault("x".into()).status_code(), 500);
    }

    #[test]
    fn not_found_message_names_entity() {
        assert_eq!(
            PorticoError::NotFound("Plugin service").to_string(),
            "Plugin service not found"
        );
    }

    #[test]
    fn storage_fault_hides_cause() {
        let err = PorticoError::storage("write state file", "permission denied (os error 13)");
        assert!(err.to_string().contains("permission denied"));
        assert_eq!(err.public_message(), STORAGE_FAULT_MESSAGE);
        assert_eq!(err.to_json_body()["error"], STORAGE_FAULT_MESSAGE);
    }
}
