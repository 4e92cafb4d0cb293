//! Error types for port operations.

use tabletop_domain::Revision;

/// Repository operation errors with context for debugging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Storage operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The write was based on a stale revision.
    #[error("Revision conflict on {entity_type}: expected {expected:?}, found {actual:?}")]
    Conflict {
        entity_type: &'static str,
        expected: Option<Revision>,
        actual: Option<Revision>,
    },
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a Conflict error for a stale write.
    pub fn conflict(
        entity_type: &'static str,
        expected: Option<Revision>,
        actual: Option<Revision>,
    ) -> Self {
        Self::Conflict {
            entity_type,
            expected,
            actual,
        }
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a revision conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_message_names_both_revisions() {
        let err = RepoError::conflict("TurnOrder", Some(Revision::new(2)), Some(Revision::new(3)));
        assert!(err.is_conflict());
        assert!(err.to_string().contains("TurnOrder"));
        assert!(err.to_string().contains("Revision(2)"));
    }

    #[test]
    fn not_found_carries_context() {
        let err = RepoError::not_found("Map", "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Map not found: abc");
    }
}
