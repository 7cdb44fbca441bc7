//! Monthly impact metrics.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::month::{Month, month_key};

/// Upper bound for [`ImpactData::program_progress`].
pub const MAX_PROGRESS_PERCENT: u32 = 100;

/// Impact figures for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactData {
    /// `"{year}-{month}"`, see [`month_key`].
    pub id: String,
    pub month: Month,
    pub year: i32,
    pub activities: u32,
    pub attendees: u32,
    pub active_kader: u32,
    /// Social fund in rupiah.
    pub social_fund: u64,
    /// Core program progress as a percentage.
    pub program_progress: u32,
}

impl ImpactData {
    /// The id this entry must be stored under.
    pub fn derived_id(&self) -> String {
        month_key(self.year, self.month)
    }

    pub fn validate(&self) -> Result<()> {
        if self.program_progress > MAX_PROGRESS_PERCENT {
            return Err(ValidationError::OutOfRange {
                field: "program progress",
                value: u64::from(self.program_progress),
                max: u64::from(MAX_PROGRESS_PERCENT),
            });
        }
        Ok(())
    }
}
