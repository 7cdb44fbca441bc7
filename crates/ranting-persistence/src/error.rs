//! Persistence error types.
//!
//! All store operations return structured errors that carry a user-facing
//! message and an optional remediation hint. Callers show these in a blocking
//! notification and keep their previous in-memory state.

use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The storage medium could not be read or rejected a write
    /// (inaccessible, quota exceeded, privacy-mode restrictions).
    #[error("storage unavailable: failed to {operation} '{key}'")]
    StorageUnavailable {
        operation: &'static str,
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A record with the same primary id already exists.
    #[error("a record with id '{id}' already exists in {store}")]
    DuplicateKey { store: &'static str, id: String },

    /// A persisted value could not be parsed.
    #[error("stored value for '{key}' is malformed")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized for storage.
    #[error("failed to serialize value for '{key}'")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The store has no secondary index with this name.
    #[error("{store} has no index named '{index}'")]
    UnknownIndex {
        store: &'static str,
        index: String,
    },

    /// A background storage task did not complete.
    #[error("storage task failed")]
    TaskFailed {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl PersistenceError {
    /// Build a [`PersistenceError::StorageUnavailable`] from an I/O error.
    pub fn unavailable(
        operation: &'static str,
        key: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::StorageUnavailable {
            operation,
            key: key.into(),
            source,
        }
    }

    /// True when the medium itself failed, as opposed to the data in it.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::StorageUnavailable { .. } | Self::TaskFailed { .. })
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::StorageUnavailable { operation, .. } => {
                if *operation == "read" || *operation == "list" {
                    "Could not load saved data. Please try refreshing.".to_string()
                } else {
                    "Error saving data. Your changes might not be saved. This could be due to \
                     browser restrictions (e.g., private mode) or lack of storage space."
                        .to_string()
                }
            }
            Self::DuplicateKey { id, .. } => {
                format!("An entry with id '{id}' already exists.")
            }
            Self::Parse { key, .. } => {
                format!(
                    "Error reading data for \"{key}\". Using default values. \
                     Your saved data might be corrupted."
                )
            }
            Self::Serialization { .. } => {
                "An error occurred while preparing the data for saving.".to_string()
            }
            Self::UnknownIndex { store, index } => {
                format!("Cannot look up {store} by '{index}'.")
            }
            Self::TaskFailed { .. } => "The storage operation did not complete.".to_string(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::StorageUnavailable { .. } | Self::TaskFailed { .. } => {
                Some("Free up storage space or leave private mode, then try again.".into())
            }
            Self::DuplicateKey { .. } => Some("Edit the existing entry instead.".into()),
            Self::Parse { .. } => Some(
                "The corrupted value was left in storage; saving again will replace it.".into(),
            ),
            Self::Serialization { .. } | Self::UnknownIndex { .. } => None,
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_failure_mentions_private_mode() {
        let err = PersistenceError::unavailable(
            "write",
            "local/programs",
            std::io::Error::other("quota exceeded"),
        );
        assert!(err.is_unavailable());
        assert!(err.user_message().contains("private mode"));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn parse_failure_names_the_key() {
        let source = serde_json::from_str::<Vec<u32>>("{not json").unwrap_err();
        let err = PersistenceError::Parse {
            key: "programs".to_string(),
            source,
        };
        assert!(!err.is_unavailable());
        assert!(err.user_message().contains("\"programs\""));
    }
}
