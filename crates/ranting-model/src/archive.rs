//! Documents held in the digital archive.

use serde::{Deserialize, Serialize};

use crate::enums::ArchiveCategory;

/// An uploaded document. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveFile {
    /// Unique id derived from the upload timestamp (`file-{epoch_ms}`).
    pub id: String,
    pub name: String,
    /// MIME type as reported by the uploader.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Payload size in bytes.
    pub size: u64,
    pub category: ArchiveCategory,
    /// Payload as a `data:` URL.
    pub data: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

impl ArchiveFile {
    /// Size in kilobytes, formatted with two decimals.
    pub fn size_kb(&self) -> String {
        format!("{:.2} KB", self.size as f64 / 1024.0)
    }
}
