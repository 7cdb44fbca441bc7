//! Report builder: monthly reports and the yearly roll-up.

use ranting_model::{MAX_REPORT_PHOTOS, Month, Report, ValidationError, month_key};
use ranting_persistence::Database;

use crate::clock::current_month_year;
use crate::data_url;
use crate::error::Result;
use crate::notice::{Notice, Outcome};

/// Fields of the monthly report form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    pub month: Month,
    pub year: i32,
    pub activity_name: String,
    pub attendees: u32,
    pub involved_kader: u32,
    pub notes: String,
    /// Photos as `data:` URLs.
    pub photos: Vec<String>,
}

impl Default for ReportDraft {
    /// An empty form for the current month.
    fn default() -> Self {
        let (month, year) = current_month_year();
        Self {
            month,
            year,
            activity_name: String::new(),
            attendees: 0,
            involved_kader: 0,
            notes: String::new(),
            photos: Vec::new(),
        }
    }
}

impl ReportDraft {
    /// Attach a photo. Fails once the form already holds the maximum.
    pub fn attach_photo(&mut self, mime: &str, bytes: &[u8]) -> std::result::Result<(), ValidationError> {
        if self.photos.len() >= MAX_REPORT_PHOTOS {
            return Err(ValidationError::TooManyPhotos {
                max: MAX_REPORT_PHOTOS,
                found: self.photos.len() + 1,
            });
        }
        self.photos.push(data_url::encode(mime, bytes));
        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.activity_name.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "activity name",
            });
        }
        if self.photos.len() > MAX_REPORT_PHOTOS {
            return Err(ValidationError::TooManyPhotos {
                max: MAX_REPORT_PHOTOS,
                found: self.photos.len(),
            });
        }
        Ok(())
    }

    /// The report this form saves, under its month key.
    pub fn to_report(&self) -> Report {
        Report {
            id: month_key(self.year, self.month),
            month: self.month,
            year: self.year,
            activity_name: self.activity_name.clone(),
            photos: self.photos.clone(),
            attendees: self.attendees,
            involved_kader: self.involved_kader,
            notes: self.notes.clone(),
        }
    }
}

/// Newest first: year descending, then month descending.
pub fn sort_newest_first(reports: &mut [Report]) {
    reports.sort_by(|a, b| b.year.cmp(&a.year).then(b.month.cmp(&a.month)));
}

/// State of the monthly report view.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    reports: Vec<Report>,
}

impl ReportBuilder {
    pub fn open(db: &Database) -> Result<Self> {
        let mut builder = Self::default();
        builder.reload(db)?;
        Ok(builder)
    }

    /// Re-read saved reports. On failure the current list is kept.
    pub fn reload(&mut self, db: &Database) -> Result<()> {
        let mut reports = db
            .get_reports()
            .inspect_err(|e| tracing::error!(error = %e, "failed to load reports"))?;
        sort_newest_first(&mut reports);
        self.reports = reports;
        Ok(())
    }

    /// Saved reports, newest first.
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Save the form. A report already saved for the same month is replaced.
    pub fn save(&mut self, db: &mut Database, draft: &ReportDraft) -> Result<Outcome<Report>> {
        draft.validate()?;
        let report = draft.to_report();
        db.save_report(&report)
            .inspect_err(|e| tracing::error!(id = %report.id, error = %e, "failed to save report"))?;
        tracing::info!(id = %report.id, photos = report.photos.len(), "report saved");
        self.reports.retain(|r| r.id != report.id);
        self.reports.push(report.clone());
        sort_newest_first(&mut self.reports);
        Ok(Outcome {
            value: report,
            notice: Notice::success("Report saved!"),
        })
    }

    pub fn delete(&mut self, db: &mut Database, id: &str) -> Result<Notice> {
        db.delete_report(id)
            .inspect_err(|e| tracing::error!(id, error = %e, "failed to delete report"))?;
        self.reports.retain(|r| r.id != id);
        Ok(Notice::success("Report deleted."))
    }
}

/// Totals over a year of reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearlySummary {
    pub reports: usize,
    pub attendees: u64,
    pub involved_kader: u64,
}

/// Reports of one year, in calendar order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlyReport {
    pub year: i32,
    pub reports: Vec<Report>,
    pub summary: YearlySummary,
}

impl YearlyReport {
    /// Collect the reports of `year` through the year index.
    pub fn generate(db: &Database, year: i32) -> Result<Self> {
        let mut reports = db.get_reports_by_year(year).inspect_err(
            |e| tracing::error!(year, error = %e, "failed to retrieve yearly reports"),
        )?;
        reports.sort_by_key(|r| r.month);
        let summary = reports.iter().fold(
            YearlySummary::default(),
            |acc, r| YearlySummary {
                reports: acc.reports.saturating_add(1),
                attendees: acc.attendees.saturating_add(u64::from(r.attendees)),
                involved_kader: acc.involved_kader.saturating_add(u64::from(r.involved_kader)),
            },
        );
        tracing::info!(year, reports = summary.reports, "yearly report generated");
        Ok(Self {
            year,
            reports,
            summary,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Info notice when the year has no reports.
    pub fn notice(&self) -> Option<Notice> {
        self.is_empty()
            .then(|| Notice::info(format!("No reports found for the year {}.", self.year)))
    }

    pub fn title(&self) -> String {
        format!("Laporan Tahunan Ranting NU - Tahun {}", self.year)
    }

    /// Suggested file name for the rendered document.
    pub fn file_name(&self) -> String {
        format!("laporan_tahunan_{}.pdf", self.year)
    }

    /// Numbered text blocks, one per report, for the document renderer.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.title()];
        for (number, report) in self.reports.iter().enumerate() {
            lines.push(format!(
                "{}. {} ({} {})",
                number + 1,
                report.activity_name,
                report.month,
                report.year
            ));
            lines.push(format!("- Jamaah Hadir: {}", report.attendees));
            lines.push(format!("- Kader Terlibat: {}", report.involved_kader));
            lines.push(format!("- Catatan: {}", report.notes));
        }
        lines
    }
}
