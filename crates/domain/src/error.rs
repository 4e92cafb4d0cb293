//! Unified error types for the domain layer
//!
//! Every failure here is a local, synchronous rejection of a single operation.
//! The component that raised it is left exactly as it was before the call.

use thiserror::Error;

use crate::value_objects::DiceParseError;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The actor lacks the DM capability required for a mutation
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// An encounter was started with no participants
    #[error("Cannot start an encounter with an empty roster")]
    EmptyRoster,

    /// A turn operation was attempted with no encounter running
    #[error("No active encounter")]
    NoActiveEncounter,

    /// Fog toggle coordinates outside the grid extent
    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// State transition not allowed
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

impl DomainError {
    /// Create an unauthorized error naming the refused action.
    ///
    /// # Example
    /// ```ignore
    /// if !requester_is_dm {
    ///     return Err(DomainError::unauthorized("only the DM can advance turns"));
    /// }
    /// ```
    pub fn unauthorized(action: impl Into<String>) -> Self {
        Self::Unauthorized(action.into())
    }

    /// Creates a validation error for business rule violations.
    ///
    /// Use this when domain invariants or constraints are violated:
    /// - Required fields are empty or missing
    /// - Values are outside allowed ranges
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid state transition error
    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }

    /// Create an out-of-bounds error for a grid coordinate
    pub fn out_of_bounds(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        Self::OutOfBounds {
            row,
            col,
            rows,
            cols,
        }
    }

    /// Check if this is an authorization failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

impl From<DiceParseError> for DomainError {
    fn from(err: DiceParseError) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_error() {
        let err = DomainError::unauthorized("only the DM can end an encounter");
        assert!(err.is_unauthorized());
        assert_eq!(
            err.to_string(),
            "Unauthorized: only the DM can end an encounter"
        );
    }

    #[test]
    fn test_out_of_bounds_error() {
        let err = DomainError::out_of_bounds(20, 0, 20, 30);
        assert!(matches!(err, DomainError::OutOfBounds { row: 20, .. }));
        assert_eq!(err.to_string(), "Cell (20, 0) is outside the 20x30 grid");
    }

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("Campaign", "123e4567-e89b-12d3-a456-426614174000");
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(err.to_string().contains("Campaign"));
        assert!(err.to_string().contains("123e4567"));
    }

    #[test]
    fn test_from_dice_parse_error() {
        let dice_err = DiceParseError::Empty;
        let domain_err: DomainError = dice_err.into();
        assert!(matches!(domain_err, DomainError::Parse(_)));
        assert!(domain_err.to_string().contains("Empty dice formula"));
    }
}
