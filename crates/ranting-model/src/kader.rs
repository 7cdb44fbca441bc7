//! Member (kader) profiles.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// A member profile. All fields are free text; only the name is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kader {
    pub id: String,
    pub name: String,
    pub position: String,
    pub expertise: String,
    pub interests: String,
    pub phone: String,
    pub availability: String,
}

impl Kader {
    /// Check required fields.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "name" });
        }
        Ok(())
    }
}
