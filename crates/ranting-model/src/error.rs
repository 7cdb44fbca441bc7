//! Validation errors raised before any store call is made.

use thiserror::Error;

/// A form or input failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field was empty.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// A month name outside the fixed month table.
    #[error("unknown month: {0}")]
    UnknownMonth(String),

    /// A numeric field is outside its allowed range.
    #[error("{field} must be at most {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },

    /// Too many photos attached to a report.
    #[error("a report can hold at most {max} photos (got {found})")]
    TooManyPhotos { max: usize, found: usize },

    /// A generator was asked to run with an empty selection.
    #[error("select at least one {what}")]
    NothingSelected { what: &'static str },

    /// A value that does not belong to a closed set.
    #[error("invalid {field} value '{value}'")]
    InvalidValue { field: &'static str, value: String },
}

impl ValidationError {
    /// Message shown to the user in the blocking notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingField { field } => format!("{} is required.", capitalize(field)),
            Self::NothingSelected { what } => format!("Please select at least one {what}."),
            other => format!("{}.", capitalize(&other.to_string())),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Result alias for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;
