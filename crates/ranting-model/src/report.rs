//! Monthly activity reports.

use serde::{Deserialize, Serialize};

use crate::month::{Month, month_key};

/// Maximum number of photos attached to a report.
pub const MAX_REPORT_PHOTOS: usize = 3;

/// A monthly activity report. At most one exists per calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// `"{year}-{month}"`, see [`month_key`].
    pub id: String,
    pub month: Month,
    pub year: i32,
    pub activity_name: String,
    /// Photo payloads as `data:` URLs.
    pub photos: Vec<String>,
    pub attendees: u32,
    pub involved_kader: u32,
    pub notes: String,
}

impl Report {
    /// The id this report must be stored under.
    pub fn derived_id(&self) -> String {
        month_key(self.year, self.month)
    }
}
