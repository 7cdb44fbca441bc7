//! Program tracker: the `programs` collection and its selection.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ranting_model::{ProgramCategory, ProgramItem, ProgramStatus, default_programs};
use ranting_persistence::{Database, PROGRAMS_KEY, SyncedCollection};

use crate::clock::timestamp_id;
use crate::csv_export::write_csv;
use crate::error::{CoreError, Result, load_warning_notice};
use crate::notice::{Notice, Outcome};

/// Fields of the add-program form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramDraft {
    pub title: String,
    pub category: ProgramCategory,
    pub status: ProgramStatus,
    pub description: String,
    pub pic: String,
    pub deadline: String,
}

impl Default for ProgramDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: ProgramCategory::Administration,
            status: ProgramStatus::NotStarted,
            description: String::new(),
            pic: String::new(),
            deadline: String::new(),
        }
    }
}

impl ProgramDraft {
    fn into_program(self, id: String) -> ProgramItem {
        ProgramItem {
            id,
            title: self.title,
            category: self.category,
            status: self.status,
            description: self.description,
            pic: self.pic,
            deadline: self.deadline,
        }
    }
}

/// Ids of the programs picked for a bulk action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    /// Flip `id` in or out of the selection. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        self.ids.extend(ids.into_iter().map(str::to_string));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

/// Category and status filter; `None` matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgramFilter {
    pub category: Option<ProgramCategory>,
    pub status: Option<ProgramStatus>,
}

impl ProgramFilter {
    pub fn matches(&self, program: &ProgramItem) -> bool {
        self.category.is_none_or(|c| program.category == c)
            && self.status.is_none_or(|s| program.status == s)
    }
}

/// State of the program tracker view.
#[derive(Debug)]
pub struct ProgramTracker {
    programs: SyncedCollection<Vec<ProgramItem>>,
    pub selection: Selection,
}

impl ProgramTracker {
    /// Load the stored programs, seeding the defaults when none are stored.
    ///
    /// Returns a notice when the stored value could not be read.
    pub fn open(db: &mut Database) -> (Self, Option<Notice>) {
        let (programs, warning) =
            SyncedCollection::open(db.local(), PROGRAMS_KEY, default_programs());
        let tracker = Self {
            programs,
            selection: Selection::default(),
        };
        (tracker, load_warning_notice(warning))
    }

    pub fn programs(&self) -> &[ProgramItem] {
        self.programs.get()
    }

    /// Whether the displayed list holds edits that failed to save.
    pub fn has_unsaved_changes(&self) -> bool {
        self.programs.is_dirty()
    }

    pub fn find(&self, id: &str) -> Result<&ProgramItem> {
        self.programs()
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::not_found("program", id))
    }

    /// Append a new program. The title is required.
    pub fn add(&mut self, db: &mut Database, draft: ProgramDraft) -> Result<Outcome<ProgramItem>> {
        let program = draft.into_program(timestamp_id("prog"));
        program.validate()?;
        let added = program.clone();
        self.programs
            .update(db.local(), |programs| programs.push(program))?;
        tracing::info!(id = %added.id, "program added");
        Ok(Outcome {
            value: added,
            notice: Notice::success("Program added successfully!"),
        })
    }

    /// Replace the program with the same id.
    pub fn update(&mut self, db: &mut Database, program: ProgramItem) -> Result<Notice> {
        program.validate()?;
        let position = self.position(&program.id)?;
        self.programs
            .update(db.local(), |programs| programs[position] = program)?;
        Ok(Notice::success("Program updated successfully!"))
    }

    /// Remove a program. Removing an unknown id changes nothing.
    pub fn delete(&mut self, db: &mut Database, id: &str) -> Result<Notice> {
        if self.find(id).is_err() {
            return Ok(Notice::info("Program already deleted."));
        }
        self.programs
            .update(db.local(), |programs| programs.retain(|p| p.id != id))?;
        self.selection.ids.remove(id);
        tracing::info!(id, "program deleted");
        Ok(Notice::success("Program deleted."))
    }

    /// Move one program to `status`. Any status may follow any other.
    pub fn set_status(&mut self, db: &mut Database, id: &str, status: ProgramStatus) -> Result<Notice> {
        let position = self.position(id)?;
        self.programs
            .update(db.local(), |programs| programs[position].status = status)?;
        Ok(Notice::success(format!("Status changed to {status}.")))
    }

    /// Move every selected program to `status` in one save, then clear the selection.
    pub fn bulk_set_status(&mut self, db: &mut Database, status: ProgramStatus) -> Result<Notice> {
        if self.selection.is_empty() {
            return Err(ranting_model::ValidationError::NothingSelected { what: "program" }.into());
        }
        let selection = &self.selection;
        let mut changed = 0usize;
        self.programs.update(db.local(), |programs| {
            for program in programs.iter_mut().filter(|p| selection.contains(&p.id)) {
                program.status = status;
                changed += 1;
            }
        })?;
        self.selection.clear();
        tracing::info!(changed, %status, "bulk status change");
        Ok(Notice::success(format!("{changed} program(s) set to {status}.")))
    }

    pub fn filter(&self, filter: &ProgramFilter) -> Vec<&ProgramItem> {
        self.programs()
            .iter()
            .filter(|p| filter.matches(p))
            .collect()
    }

    /// Programs grouped by category, in the fixed category order.
    ///
    /// Every category appears, including empty ones.
    pub fn by_category(&self) -> Vec<(ProgramCategory, Vec<&ProgramItem>)> {
        ProgramCategory::ALL
            .iter()
            .map(|&category| {
                let items = self
                    .programs()
                    .iter()
                    .filter(|p| p.category == category)
                    .collect();
                (category, items)
            })
            .collect()
    }

    /// Export all programs, or only those with `status`, to
    /// `program_data[_<status>].csv` in `dir`.
    pub fn export_csv(&self, dir: &Path, status: Option<ProgramStatus>) -> Result<Option<PathBuf>> {
        let name = match status {
            Some(status) => format!("program_data_{}", status.slug()),
            None => "program_data".to_string(),
        };
        let rows: Vec<&ProgramItem> = self.filter(&ProgramFilter {
            category: None,
            status,
        });
        write_csv(dir, &name, &rows)
    }

    /// Pick up a change made by another context. Call after `Database::local().sync()`.
    pub fn refresh(&mut self) -> bool {
        let replaced = self.programs.refresh();
        if replaced {
            let programs = self.programs.get();
            self.selection
                .ids
                .retain(|id| programs.iter().any(|p| &p.id == id));
        }
        replaced
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.programs()
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::not_found("program", id))
    }
}
