//! Record types for the ranting organization dashboard.
//!
//! Every record is a flat value; records never own each other and refer to
//! one another only through denormalized strings. Field names and enum labels
//! serialize to the format already present in stored data.

pub mod archive;
pub mod enums;
pub mod error;
pub mod impact;
pub mod kader;
pub mod month;
pub mod program;
pub mod renja;
pub mod report;

pub use archive::ArchiveFile;
pub use enums::{ArchiveCategory, ProgramCategory, ProgramStatus};
pub use error::{Result, ValidationError};
pub use impact::{ImpactData, MAX_PROGRESS_PERCENT};
pub use kader::Kader;
pub use month::{MONTH_NAMES, Month, month_key, month_key_for_name};
pub use program::{ProgramItem, default_programs};
pub use renja::{RenjaItem, RenjaPlan};
pub use report::{MAX_REPORT_PHOTOS, Report};
