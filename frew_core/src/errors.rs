//! # Error Types
//!
//! Structured error types for frew_core. Every fallible operation in the
//! library returns one of these variants so that scripts can branch on the
//! failure kind rather than parse message strings.
//!
//! ## Example
//!
//! ```rust
//! use frew_core::errors::{FrewError, FrewResult};
//!
//! fn validate_node(node: usize) -> FrewResult<()> {
//!     if node == 0 {
//!         return Err(FrewError::validation(
//!             "node",
//!             node.to_string(),
//!             "Node numbers are 1-based",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for frew_core operations
pub type FrewResult<T> = Result<T, FrewError>;

/// Structured error type for model document and engine operations.
///
/// Each variant maps to one failure kind of the library contract. The
/// variants serialize with a `type` discriminator so callers embedding
/// frew_core behind an API can pass errors through as JSON.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum FrewError {
    /// A referenced path, strut, or material does not exist
    #[error("{item} not found: {key}")]
    NotFound { item: String, key: String },

    /// File extension or content does not match the expected document type
    #[error("Format error for '{path}': {reason}")]
    Format { path: String, reason: String },

    /// A caller-supplied argument fails a precondition
    #[error("Invalid argument '{argument}': {value} - {reason}")]
    Validation {
        argument: String,
        value: String,
        reason: String,
    },

    /// The document is missing an expected key or has a short array at an
    /// expected position. Both collapse to this one kind: the contract
    /// promises "retrievable or not", not which structural reason.
    #[error("Unable to retrieve {path} from the model document")]
    Structure { path: String },

    /// Cross-checked quantities disagree (e.g. node counts across stages)
    #[error("Inconsistent model: {reason}")]
    Consistency { reason: String },

    /// Results were requested before any analysis has been run
    #[error("No results in the model, please analyse the model first")]
    NoResults,

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error outside of document loading
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// The external analysis engine reported a failure
    #[error("Engine error during {operation}: {reason}")]
    Engine { operation: String, reason: String },
}

impl FrewError {
    /// Create a NotFound error
    pub fn not_found(item: impl Into<String>, key: impl Into<String>) -> Self {
        FrewError::NotFound {
            item: item.into(),
            key: key.into(),
        }
    }

    /// Create a Format error
    pub fn format(path: impl Into<String>, reason: impl Into<String>) -> Self {
        FrewError::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a Validation error
    pub fn validation(
        argument: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        FrewError::Validation {
            argument: argument.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Structure error for a document path that could not be read
    pub fn structure(path: impl Into<String>) -> Self {
        FrewError::Structure { path: path.into() }
    }

    /// Create a Consistency error
    pub fn consistency(reason: impl Into<String>) -> Self {
        FrewError::Consistency {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        FrewError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        FrewError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create an Engine error
    pub fn engine(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        FrewError::Engine {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry after waiting)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FrewError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            FrewError::NotFound { .. } => "NOT_FOUND",
            FrewError::Format { .. } => "FORMAT",
            FrewError::Validation { .. } => "VALIDATION",
            FrewError::Structure { .. } => "STRUCTURE",
            FrewError::Consistency { .. } => "CONSISTENCY",
            FrewError::NoResults => "NO_RESULTS",
            FrewError::FileError { .. } => "FILE_ERROR",
            FrewError::FileLocked { .. } => "FILE_LOCKED",
            FrewError::Serialization { .. } => "SERIALIZATION",
            FrewError::Engine { .. } => "ENGINE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = FrewError::validation("node", "-3", "Node numbers are 1-based");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: FrewError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(FrewError::structure("Stages").error_code(), "STRUCTURE");
        assert_eq!(FrewError::NoResults.error_code(), "NO_RESULTS");
        assert_eq!(
            FrewError::not_found("strut", "node 5").error_code(),
            "NOT_FOUND"
        );
    }

    #[test]
    fn test_recoverable() {
        let locked = FrewError::file_locked("model.json", "a.user", "2026-01-01T00:00:00Z");
        assert!(locked.is_recoverable());
        assert!(!FrewError::NoResults.is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = FrewError::structure("OasysHeader/Titles");
        assert_eq!(
            err.to_string(),
            "Unable to retrieve OasysHeader/Titles from the model document"
        );
    }
}
