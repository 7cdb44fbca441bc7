//! Impact dashboard: monthly figures in the `impact_data` collection.

use ranting_model::{ImpactData, Month, month_key};
use ranting_persistence::{Database, IMPACT_DATA_KEY, SyncedCollection};

use crate::clock::current_month_year;
use crate::error::{Result, load_warning_notice};
use crate::notice::Notice;

/// Fields of the monthly input form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpactInput {
    pub month: Month,
    pub year: i32,
    pub activities: u32,
    pub attendees: u32,
    pub active_kader: u32,
    pub social_fund: u64,
    pub program_progress: u32,
}

impl Default for ImpactInput {
    /// Zero counters for the current month.
    fn default() -> Self {
        let (month, year) = current_month_year();
        Self {
            month,
            year,
            activities: 0,
            attendees: 0,
            active_kader: 0,
            social_fund: 0,
            program_progress: 0,
        }
    }
}

impl ImpactInput {
    pub fn to_data(&self) -> ImpactData {
        ImpactData {
            id: month_key(self.year, self.month),
            month: self.month,
            year: self.year,
            activities: self.activities,
            attendees: self.attendees,
            active_kader: self.active_kader,
            social_fund: self.social_fund,
            program_progress: self.program_progress,
        }
    }
}

/// Totals shown above the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImpactSummary {
    pub total_activities: u64,
    pub total_attendees: u64,
    pub total_social_fund: u64,
}

/// State of the impact dashboard.
#[derive(Debug)]
pub struct ImpactDashboard {
    rows: SyncedCollection<Vec<ImpactData>>,
    pub input: ImpactInput,
}

impl ImpactDashboard {
    pub fn open(db: &mut Database) -> (Self, Option<Notice>) {
        let (rows, warning) = SyncedCollection::open(db.local(), IMPACT_DATA_KEY, Vec::new());
        let dashboard = Self {
            rows,
            input: ImpactInput::default(),
        };
        (dashboard, load_warning_notice(warning))
    }

    /// Rows in stored order.
    pub fn rows(&self) -> &[ImpactData] {
        self.rows.get()
    }

    /// Save the current input. An entry for the same month is replaced in
    /// place; otherwise the entry is appended.
    pub fn save(&mut self, db: &mut Database) -> Result<Notice> {
        let entry = self.input.to_data();
        entry.validate()?;
        let id = entry.id.clone();
        self.rows.update(db.local(), |rows| {
            match rows.iter().position(|row| row.id == entry.id) {
                Some(index) => rows[index] = entry,
                None => rows.push(entry),
            }
        })?;
        tracing::info!(%id, "impact data saved");
        Ok(Notice::success("Data saved!"))
    }

    /// Rows ordered by year, then month.
    pub fn chronological(&self) -> Vec<&ImpactData> {
        let mut rows: Vec<&ImpactData> = self.rows().iter().collect();
        rows.sort_by_key(|row| (row.year, row.month));
        rows
    }

    pub fn summary(&self) -> ImpactSummary {
        self.rows()
            .iter()
            .fold(ImpactSummary::default(), |acc, row| ImpactSummary {
                total_activities: acc.total_activities.saturating_add(u64::from(row.activities)),
                total_attendees: acc.total_attendees.saturating_add(u64::from(row.attendees)),
                total_social_fund: acc.total_social_fund.saturating_add(row.social_fund),
            })
    }

    /// Pick up a change made by another context.
    pub fn refresh(&mut self) -> bool {
        self.rows.refresh()
    }
}

/// Rupiah amount with `.` thousands separators: `Rp 1.250.000`.
pub fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    format!("Rp {grouped}")
}
