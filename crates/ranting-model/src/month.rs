//! Calendar months and the month key used to address monthly records.
//!
//! Reports and impact entries are stored under `"{year}-{month}"` where the
//! month is 1-based and never zero-padded (`2024-3`, not `2024-03`). The key
//! is the only thing enforcing one record per calendar month, so the string
//! form must stay exactly as it is on disk.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Month names in calendar order, as they appear on disk and in the UI.
pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Zero-based position in the year.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// One-based month number.
    #[inline]
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Month for a zero-based index, wrapping is not applied.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Month for a one-based number (1..=12).
    pub fn from_number(number: u32) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Self::from_index(index as usize))
    }

    /// Display name used on disk.
    pub fn name(self) -> &'static str {
        MONTH_NAMES[self.index()]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = ValidationError;

    /// Parses the stored month name. Matching ignores case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        MONTH_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(trimmed))
            .and_then(Self::from_index)
            .ok_or_else(|| ValidationError::UnknownMonth(s.to_string()))
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Derive the storage id for a monthly record.
///
/// ```
/// use ranting_model::{Month, month_key};
/// assert_eq!(month_key(2024, Month::March), "2024-3");
/// assert_eq!(month_key(2024, Month::December), "2024-12");
/// ```
pub fn month_key(year: i32, month: Month) -> String {
    format!("{}-{}", year, month.number())
}

/// Derive the storage id from a month name as entered by the user.
pub fn month_key_for_name(year: i32, month_name: &str) -> Result<String, ValidationError> {
    let month = month_name.parse::<Month>()?;
    Ok(month_key(year, month))
}
