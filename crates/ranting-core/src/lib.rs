//! View state and operations for the ranting dashboard.
//!
//! Each view owns its state explicitly and mutates it only through methods
//! that return [`Result`]. A failed call leaves the state as it was, except
//! for the keyed collections, where the displayed value keeps an edit whose
//! save failed until the next successful save or external refresh.
//!
//! # Architecture
//!
//! - `program.rs`, `renja.rs`, `impact.rs` - Views over keyed collections
//! - `kader.rs`, `archive.rs`, `report.rs` - Views over object stores
//! - `content.rs` - Poster templates (no persistence)
//! - `csv_export.rs` - CSV export of flat records
//! - `notice.rs` / `error.rs` - User-facing outcomes

pub mod archive;
pub mod clock;
pub mod content;
pub mod csv_export;
pub mod data_url;
pub mod error;
pub mod impact;
pub mod kader;
pub mod notice;
pub mod program;
pub mod renja;
pub mod report;

pub use archive::{Archive, ArchiveFilter, Download, UploadRequest};
pub use content::{CONTENT_TEMPLATES, ContentDraft, ContentTemplate};
pub use csv_export::{to_csv, write_csv};
pub use error::{CoreError, Result};
pub use impact::{ImpactDashboard, ImpactInput, ImpactSummary, format_rupiah};
pub use kader::{KaderDraft, KaderFilter, KaderMap};
pub use notice::{Notice, NoticeLevel, Outcome};
pub use program::{ProgramDraft, ProgramFilter, ProgramTracker, Selection};
pub use renja::{RENJA_TEMPLATES, RenjaBuilder, RenjaTemplate};
pub use report::{ReportBuilder, ReportDraft, YearlyReport, YearlySummary};
