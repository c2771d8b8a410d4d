//! Error types for the persistence layer
//!
//! Provides unified error handling using thiserror.
//!
//! These errors are internal by design: no public map operation surfaces
//! them. The map layer logs and discards every persistence failure, so the
//! in-memory state stays authoritative for the rest of the process lifetime.

use thiserror::Error;

// == Persist Error Enum ==
/// Unified error type for persistence failures.
#[derive(Error, Debug)]
pub enum PersistError {
    /// A value could not be serialized to its stored textual form
    #[error("Failed to encode value for key '{key}': {source}")]
    Encode {
        /// The unprefixed map key
        key: String,
        /// The underlying serialization error
        source: serde_json::Error,
    },

    /// A stored textual value could not be deserialized
    #[error("Failed to decode stored value for key '{key}': {source}")]
    Decode {
        /// The unprefixed map key
        key: String,
        /// The underlying deserialization error
        source: serde_json::Error,
    },

    /// The backing store rejected a write (e.g. quota exceeded, unavailable)
    #[error("Backing store rejected write: {0}")]
    Store(String),
}

// == Result Type Alias ==
/// Convenience Result type for the persistence layer.
pub type Result<T> = std::result::Result<T, PersistError>;

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_store() {
        let err = PersistError::Store("quota exceeded".to_string());
        assert_eq!(
            err.to_string(),
            "Backing store rejected write: quota exceeded"
        );
    }

    #[test]
    fn test_error_display_decode() {
        let source = serde_json::from_str::<String>("not json").unwrap_err();
        let err = PersistError::Decode {
            key: "player1".to_string(),
            source,
        };
        assert!(err
            .to_string()
            .starts_with("Failed to decode stored value for key 'player1':"));
    }
}
