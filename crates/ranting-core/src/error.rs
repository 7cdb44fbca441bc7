//! Error type for view operations.

use std::path::PathBuf;

use ranting_model::ValidationError;
use ranting_persistence::PersistenceError;
use thiserror::Error;

use crate::data_url::DataUrlError;
use crate::notice::Notice;

/// A view operation failed. The view's state is left as it was before the call.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The store rejected or could not complete the operation.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Input was rejected before any store call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// A stored payload is not a valid data URL.
    #[error("payload of '{id}' cannot be decoded")]
    Payload {
        id: String,
        #[source]
        source: DataUrlError,
    },

    /// CSV rendering failed.
    #[error("failed to render CSV")]
    Csv(#[from] csv::Error),

    /// Reading or writing a file on the host failed.
    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Persistence(e) => e.user_message(),
            Self::Validation(e) => e.user_message(),
            Self::NotFound { kind, .. } => {
                let mut chars = kind.chars();
                match chars.next() {
                    Some(first) => format!("{}{} not found.", first.to_uppercase(), chars.as_str()),
                    None => "Not found.".to_string(),
                }
            }
            Self::Payload { .. } => "The stored file is damaged and cannot be opened.".to_string(),
            Self::Csv(_) => "Could not prepare the CSV export.".to_string(),
            Self::Io { path, .. } => format!("Could not access {}.", path.display()),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Persistence(e) => e.suggestion(),
            Self::NotFound { .. } => Some("Return to the list and choose an existing entry.".into()),
            Self::Payload { .. } => Some("Delete the file and upload it again.".into()),
            Self::Io { .. } => Some("Check that the path exists and is writable.".into()),
            Self::Validation(_) | Self::Csv(_) => None,
        }
    }

    /// Blocking notification for this error.
    pub fn notice(&self) -> Notice {
        Notice::error(self.user_message()).with_suggestion(self.suggestion())
    }
}

/// Notice for a warning raised while loading a collection, if any.
pub(crate) fn load_warning_notice(warning: Option<PersistenceError>) -> Option<Notice> {
    warning.map(|e| CoreError::from(e).notice())
}

/// Result type alias for view operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_notice() {
        let notice = CoreError::not_found("program", "prog-9").notice();
        assert!(notice.is_error());
        assert_eq!(notice.message, "Program not found.");
        assert!(notice.suggestion.is_some());
    }

    #[test]
    fn validation_notice_has_no_suggestion() {
        let err: CoreError = ValidationError::MissingField { field: "name" }.into();
        let notice = err.notice();
        assert_eq!(notice.message, "Name is required.");
        assert_eq!(notice.suggestion, None);
    }

    #[test]
    fn storage_failure_notice_carries_remedy() {
        let err: CoreError = PersistenceError::unavailable(
            "write",
            "kaderMap/kader-1",
            std::io::Error::other("quota"),
        )
        .into();
        let notice = err.notice();
        assert!(notice.message.contains("private mode"));
        assert!(notice.suggestion.is_some());
    }
}
