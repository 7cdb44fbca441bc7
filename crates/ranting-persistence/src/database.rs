//! The dashboard database: three object stores plus the keyed blob tier.

use std::path::Path;
use std::sync::Arc;

use ranting_model::{ArchiveFile, Kader, Report};

use crate::error::Result;
use crate::keyed::KeyedStore;
use crate::medium::{DirectoryMedium, SharedMedium};
use crate::structured::ObjectStore;

/// Database schema version. Bump when a store or index is added.
pub const SCHEMA_VERSION: u32 = 1;

/// Handle to every store the dashboard persists.
///
/// All stores share one medium. Lookups read the medium directly, so several
/// handles opened over the same medium see each other's writes.
#[derive(Debug)]
pub struct Database {
    medium: SharedMedium,
    archive: ObjectStore<ArchiveFile>,
    kader: ObjectStore<Kader>,
    reports: ObjectStore<Report>,
    local: KeyedStore,
}

impl Database {
    /// Open the database over an existing medium.
    pub fn open(medium: SharedMedium) -> Result<Self> {
        let archive = ObjectStore::open(medium.clone())?;
        let kader = ObjectStore::open(medium.clone())?;
        let reports = ObjectStore::open(medium.clone())?;
        tracing::info!(version = SCHEMA_VERSION, "database opened");
        Ok(Self {
            local: KeyedStore::new(medium.clone()),
            medium,
            archive,
            kader,
            reports,
        })
    }

    /// Open a database stored in a directory, creating it when missing.
    pub fn open_dir(root: impl AsRef<Path>) -> Result<Self> {
        let medium = DirectoryMedium::open(root.as_ref().to_path_buf())?;
        Self::open(Arc::new(medium))
    }

    pub fn medium(&self) -> &SharedMedium {
        &self.medium
    }

    /// Keyed blob tier sharing this database's medium.
    pub fn local(&mut self) -> &mut KeyedStore {
        &mut self.local
    }

    // Digital archive

    pub fn add_file(&mut self, file: &ArchiveFile) -> Result<()> {
        self.archive.insert(file)
    }

    pub fn get_files(&self) -> Result<Vec<ArchiveFile>> {
        self.archive.get_all()
    }

    pub fn get_file_by_id(&self, id: &str) -> Result<Option<ArchiveFile>> {
        self.archive.get_by_id(id)
    }

    /// Files in one category, via the `category` index.
    pub fn get_files_by_category(&self, category: &str) -> Result<Vec<ArchiveFile>> {
        self.archive.get_by_index("category", category)
    }

    pub fn delete_file(&mut self, id: &str) -> Result<()> {
        self.archive.delete(id)
    }

    // Member map

    pub fn add_kader(&mut self, kader: &Kader) -> Result<()> {
        self.kader.insert(kader)
    }

    pub fn get_kader(&self) -> Result<Vec<Kader>> {
        self.kader.get_all()
    }

    pub fn get_kader_by_id(&self, id: &str) -> Result<Option<Kader>> {
        self.kader.get_by_id(id)
    }

    /// Members whose `index` (`position`, `expertise` or `interests`) equals `value`.
    pub fn get_kader_by_index(&self, index: &str, value: &str) -> Result<Vec<Kader>> {
        self.kader.get_by_index(index, value)
    }

    /// Overwrite a member profile, inserting it when absent.
    pub fn update_kader(&mut self, kader: &Kader) -> Result<()> {
        self.kader.update(kader)
    }

    pub fn delete_kader(&mut self, id: &str) -> Result<()> {
        self.kader.delete(id)
    }

    // Monthly reports

    /// Insert a report; fails when a report for the same month exists.
    pub fn add_report(&mut self, report: &Report) -> Result<()> {
        self.reports.insert(report)
    }

    /// Insert or overwrite the report for its month.
    pub fn save_report(&mut self, report: &Report) -> Result<()> {
        self.reports.update(report)
    }

    pub fn get_reports(&self) -> Result<Vec<Report>> {
        self.reports.get_all()
    }

    pub fn get_report_by_id(&self, id: &str) -> Result<Option<Report>> {
        self.reports.get_by_id(id)
    }

    pub fn delete_report(&mut self, id: &str) -> Result<()> {
        self.reports.delete(id)
    }

    /// Reports of one year, via the `year` index.
    pub fn get_reports_by_year(&self, year: i32) -> Result<Vec<Report>> {
        self.reports.get_by_index("year", &year.to_string())
    }
}
