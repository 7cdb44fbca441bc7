//! Program tracker items.

use serde::{Deserialize, Serialize};

use crate::enums::{ProgramCategory, ProgramStatus};
use crate::error::{Result, ValidationError};

/// A tracked program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramItem {
    pub id: String,
    pub title: String,
    pub category: ProgramCategory,
    pub status: ProgramStatus,
    pub description: String,
    /// Person in charge.
    pub pic: String,
    /// Deadline as an ISO date string (`YYYY-MM-DD`), may be empty.
    pub deadline: String,
}

impl ProgramItem {
    /// Check required fields.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "title" });
        }
        Ok(())
    }
}

/// Programs used when nothing has been stored yet.
pub fn default_programs() -> Vec<ProgramItem> {
    vec![
        ProgramItem {
            id: "prog-1".to_string(),
            title: "Rapat Anggota Tahunan".to_string(),
            category: ProgramCategory::Administration,
            status: ProgramStatus::Completed,
            description: "...".to_string(),
            pic: "Ketua".to_string(),
            deadline: "2024-03-31".to_string(),
        },
        ProgramItem {
            id: "prog-2".to_string(),
            title: "Latihan Kader Dasar".to_string(),
            category: ProgramCategory::CadreFormation,
            status: ProgramStatus::InProgress,
            description: "...".to_string(),
            pic: "Sekretaris".to_string(),
            deadline: "2024-06-30".to_string(),
        },
        ProgramItem {
            id: "prog-3".to_string(),
            title: "Website Ranting".to_string(),
            category: ProgramCategory::Digitalization,
            status: ProgramStatus::NotStarted,
            description: "...".to_string(),
            pic: "Bendahara".to_string(),
            deadline: "2024-09-30".to_string(),
        },
    ]
}
