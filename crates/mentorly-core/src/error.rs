//! Error types for Mentorly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Mentorly workspace.
///
/// Analytics never produce these; they come from the data API, from
/// ingestion of raw records and from state-container preconditions.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MentorlyError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A record or request broke a domain rule
    #[error("Validation error: {0}")]
    Validation(String),

    /// A status change that would move a record backwards or out of a terminal state
    #[error("Invalid {entity_type} transition: {from} -> {to}")]
    InvalidTransition {
        entity_type: &'static str,
        from: String,
        to: String,
    },

    /// The operation needs a signed-in user and the store has none
    #[error("No user is signed in")]
    NotSignedIn,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MentorlyError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an InvalidTransition error
    pub fn invalid_transition(
        entity_type: &'static str,
        from: impl ToString,
        to: impl ToString,
    ) -> Self {
        Self::InvalidTransition {
            entity_type,
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an invalid status transition
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    /// Check if this is a data access error
    pub fn is_data_access(&self) -> bool {
        matches!(self, Self::DataAccess(_))
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for MentorlyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MentorlyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MentorlyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for MentorlyError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MentorlyError>`.
pub type Result<T> = std::result::Result<T, MentorlyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = MentorlyError::not_found("session", "s-1");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: session 's-1'");
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = MentorlyError::invalid_transition("session", "completed", "pending");
        assert!(err.is_invalid_transition());
        assert_eq!(
            err.to_string(),
            "Invalid session transition: completed -> pending"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let err: MentorlyError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, MentorlyError::Serialization { ref format, .. } if format == "JSON"));
    }
}
