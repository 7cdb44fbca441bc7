//! Kader map: member profiles in the `kaderMap` store.

use std::path::{Path, PathBuf};

use ranting_model::Kader;
use ranting_persistence::Database;

use crate::clock::timestamp_id;
use crate::csv_export::write_csv;
use crate::error::{CoreError, Result};
use crate::notice::{Notice, Outcome};

/// Search box plus the three attribute filters.
///
/// Every non-empty term must appear, case-insensitively, in its field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KaderFilter {
    /// Matched against the name.
    pub search: String,
    pub position: String,
    pub interests: String,
    pub expertise: String,
}

impl KaderFilter {
    pub fn matches(&self, kader: &Kader) -> bool {
        contains_ignore_case(&kader.name, &self.search)
            && contains_ignore_case(&kader.position, &self.position)
            && contains_ignore_case(&kader.interests, &self.interests)
            && contains_ignore_case(&kader.expertise, &self.expertise)
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.position.is_empty()
            && self.interests.is_empty()
            && self.expertise.is_empty()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Fields of the add-member form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KaderDraft {
    pub name: String,
    pub position: String,
    pub expertise: String,
    pub interests: String,
    pub phone: String,
    pub availability: String,
}

impl KaderDraft {
    fn into_kader(self, id: String) -> Kader {
        Kader {
            id,
            name: self.name,
            position: self.position,
            expertise: self.expertise,
            interests: self.interests,
            phone: self.phone,
            availability: self.availability,
        }
    }
}

/// State of the member list view.
#[derive(Debug, Default)]
pub struct KaderMap {
    members: Vec<Kader>,
    pub filter: KaderFilter,
}

impl KaderMap {
    /// Load every member profile.
    pub fn open(db: &Database) -> Result<Self> {
        let mut map = Self::default();
        map.reload(db)?;
        Ok(map)
    }

    /// Re-read the member list. On failure the current list is kept.
    pub fn reload(&mut self, db: &Database) -> Result<()> {
        let members = db
            .get_kader()
            .inspect_err(|e| tracing::error!(error = %e, "failed to load kader list"))?;
        self.members = members;
        Ok(())
    }

    pub fn members(&self) -> &[Kader] {
        &self.members
    }

    /// Members passing the current filter.
    pub fn filtered(&self) -> Vec<&Kader> {
        self.members
            .iter()
            .filter(|k| self.filter.matches(k))
            .collect()
    }

    /// Register a new member. The name is required.
    pub fn add(&mut self, db: &mut Database, draft: KaderDraft) -> Result<Outcome<Kader>> {
        let kader = draft.into_kader(timestamp_id("kader"));
        kader.validate()?;
        db.add_kader(&kader)
            .inspect_err(|e| tracing::error!(error = %e, "failed to add kader"))?;
        tracing::info!(id = %kader.id, "kader added");
        self.members.push(kader.clone());
        Ok(Outcome {
            value: kader,
            notice: Notice::success("Kader added successfully!"),
        })
    }

    /// Fetch a profile for the edit form.
    pub fn load_for_edit(&self, db: &Database, id: &str) -> Result<Kader> {
        db.get_kader_by_id(id)
            .inspect_err(|e| tracing::error!(id, error = %e, "failed to fetch kader"))?
            .ok_or_else(|| CoreError::not_found("member", id))
    }

    /// Overwrite a profile with the edit form's values.
    pub fn save_edit(&mut self, db: &mut Database, kader: Kader) -> Result<Notice> {
        kader.validate()?;
        db.update_kader(&kader)
            .inspect_err(|e| tracing::error!(id = %kader.id, error = %e, "failed to update kader"))?;
        match self.members.iter().position(|k| k.id == kader.id) {
            Some(index) => self.members[index] = kader,
            None => self.members.push(kader),
        }
        Ok(Notice::success("Kader updated successfully!"))
    }

    pub fn delete(&mut self, db: &mut Database, id: &str) -> Result<Notice> {
        db.delete_kader(id)
            .inspect_err(|e| tracing::error!(id, error = %e, "failed to delete kader"))?;
        self.members.retain(|k| k.id != id);
        Ok(Notice::success("Member deleted."))
    }

    /// Export the filtered list to `kader_data.csv` in `dir`.
    pub fn export_csv(&self, dir: &Path) -> Result<Option<PathBuf>> {
        write_csv(dir, "kader_data", &self.filtered())
    }
}
