//! Closed value sets shared by the dashboard records.
//!
//! The serialized strings are the labels already present in stored data and
//! must not change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Category of a document in the digital archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ArchiveCategory {
    #[serde(rename = "Administrasi")]
    Administration,
    #[serde(rename = "Surat")]
    Letter,
    #[serde(rename = "Kegiatan")]
    Activity,
    #[serde(rename = "Keuangan")]
    Finance,
}

impl ArchiveCategory {
    pub const ALL: [ArchiveCategory; 4] = [
        ArchiveCategory::Administration,
        ArchiveCategory::Letter,
        ArchiveCategory::Activity,
        ArchiveCategory::Finance,
    ];

    /// Stored label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Administration => "Administrasi",
            Self::Letter => "Surat",
            Self::Activity => "Kegiatan",
            Self::Finance => "Keuangan",
        }
    }
}

impl fmt::Display for ArchiveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        match value.to_ascii_lowercase().as_str() {
            "administrasi" | "administration" => Ok(Self::Administration),
            "surat" | "letter" => Ok(Self::Letter),
            "kegiatan" | "activity" => Ok(Self::Activity),
            "keuangan" | "finance" => Ok(Self::Finance),
            _ => Err(ValidationError::InvalidValue {
                field: "archive category",
                value: s.to_string(),
            }),
        }
    }
}

/// Category of a tracked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProgramCategory {
    #[serde(rename = "Administrasi")]
    Administration,
    #[serde(rename = "Kaderisasi")]
    CadreFormation,
    #[serde(rename = "Digitalisasi")]
    Digitalization,
    #[serde(rename = "Sosial")]
    Social,
}

impl ProgramCategory {
    /// Display order used when grouping programs.
    pub const ALL: [ProgramCategory; 4] = [
        ProgramCategory::Administration,
        ProgramCategory::CadreFormation,
        ProgramCategory::Digitalization,
        ProgramCategory::Social,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Administration => "Administrasi",
            Self::CadreFormation => "Kaderisasi",
            Self::Digitalization => "Digitalisasi",
            Self::Social => "Sosial",
        }
    }
}

impl fmt::Display for ProgramCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgramCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "administrasi" | "administration" => Ok(Self::Administration),
            "kaderisasi" | "cadre-formation" => Ok(Self::CadreFormation),
            "digitalisasi" | "digitalization" => Ok(Self::Digitalization),
            "sosial" | "social" => Ok(Self::Social),
            _ => Err(ValidationError::InvalidValue {
                field: "program category",
                value: s.to_string(),
            }),
        }
    }
}

/// Progress of a program. Any status may move to any other.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ProgramStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl ProgramStatus {
    pub const ALL: [ProgramStatus; 3] = [
        ProgramStatus::NotStarted,
        ProgramStatus::InProgress,
        ProgramStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Lowercase, underscore-separated form used in file names.
    pub fn slug(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgramStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "notstarted" => Ok(Self::NotStarted),
            "inprogress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ValidationError::InvalidValue {
                field: "program status",
                value: s.to_string(),
            }),
        }
    }
}
