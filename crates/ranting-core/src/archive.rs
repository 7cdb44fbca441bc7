//! Digital archive: uploaded documents in the `digitalArchive` store.

use chrono::{DateTime, Local};
use ranting_model::{ArchiveCategory, ArchiveFile, ValidationError};
use ranting_persistence::Database;

use crate::clock::now_millis;
use crate::data_url;
use crate::error::{CoreError, Result};
use crate::notice::{Notice, Outcome};

/// A file picked for upload. MIME type and size are taken as reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    pub category: ArchiveCategory,
}

/// Name search plus category; `None` is "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveFilter {
    pub search: String,
    pub category: Option<ArchiveCategory>,
}

impl ArchiveFilter {
    pub fn matches(&self, file: &ArchiveFile) -> bool {
        file.name
            .to_lowercase()
            .contains(&self.search.to_lowercase())
            && self.category.is_none_or(|c| file.category == c)
    }
}

/// A decoded file ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// State of the archive view. Files are kept newest first.
#[derive(Debug, Default)]
pub struct Archive {
    files: Vec<ArchiveFile>,
    pub filter: ArchiveFilter,
}

impl Archive {
    pub fn open(db: &Database) -> Result<Self> {
        let mut archive = Self::default();
        archive.reload(db)?;
        Ok(archive)
    }

    /// Re-read the archive. On failure the current list is kept.
    pub fn reload(&mut self, db: &Database) -> Result<()> {
        let mut files = db
            .get_files()
            .inspect_err(|e| tracing::error!(error = %e, "failed to load archive files"))?;
        files.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.files = files;
        Ok(())
    }

    pub fn files(&self) -> &[ArchiveFile] {
        &self.files
    }

    pub fn filtered(&self) -> Vec<&ArchiveFile> {
        self.files.iter().filter(|f| self.filter.matches(f)).collect()
    }

    /// Store an uploaded file under a fresh `file-{epoch_ms}` id.
    pub fn upload(&mut self, db: &mut Database, request: UploadRequest) -> Result<Outcome<ArchiveFile>> {
        if request.name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "file" }.into());
        }
        let created_at = now_millis();
        let data = data_url::encode(&request.mime, &request.bytes);
        let file = ArchiveFile {
            id: format!("file-{created_at}"),
            name: request.name,
            mime_type: request.mime,
            size: request.bytes.len() as u64,
            category: request.category,
            data,
            created_at,
        };
        db.add_file(&file)
            .inspect_err(|e| tracing::error!(error = %e, "failed to upload file"))?;
        tracing::info!(id = %file.id, size = file.size, "file uploaded");
        self.files.insert(0, file.clone());
        Ok(Outcome {
            value: file,
            notice: Notice::success("File uploaded successfully!"),
        })
    }

    /// Decode a stored file back to its bytes.
    pub fn download(&self, db: &Database, id: &str) -> Result<Download> {
        let file = db
            .get_file_by_id(id)
            .inspect_err(|e| tracing::error!(id, error = %e, "failed to read file"))?
            .ok_or_else(|| CoreError::not_found("file", id))?;
        let payload = data_url::decode(&file.data).map_err(|source| CoreError::Payload {
            id: id.to_string(),
            source,
        })?;
        Ok(Download {
            file_name: file.name,
            mime: payload.mime,
            bytes: payload.bytes,
        })
    }

    pub fn delete(&mut self, db: &mut Database, id: &str) -> Result<Notice> {
        db.delete_file(id)
            .inspect_err(|e| tracing::error!(id, error = %e, "failed to delete file"))?;
        self.files.retain(|f| f.id != id);
        Ok(Notice::success("File deleted."))
    }
}

/// One-line description shown under a file name: category, size and upload date.
pub fn describe(file: &ArchiveFile) -> String {
    let date = DateTime::from_timestamp_millis(file.created_at)
        .map(|utc| utc.with_timezone(&Local).format("%d/%m/%Y").to_string())
        .unwrap_or_default();
    format!("{} - {} - {}", file.category, file.size_kb(), date)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ranting_persistence::MemoryMedium;

    use super::*;

    fn request(name: &str, category: ArchiveCategory) -> UploadRequest {
        UploadRequest {
            name: name.to_string(),
            mime: "text/plain".to_string(),
            bytes: b"surat undangan".to_vec(),
            category,
        }
    }

    #[test]
    fn upload_then_download_returns_bytes() {
        let mut db = Database::open(Arc::new(MemoryMedium::new())).unwrap();
        let mut archive = Archive::open(&db).unwrap();
        let file = archive
            .upload(&mut db, request("undangan.txt", ArchiveCategory::Letter))
            .unwrap()
            .value;
        assert!(file.id.starts_with("file-"));
        assert_eq!(file.size, 14);
        assert!(file.data.starts_with("data:text/plain;base64,"));

        let download = archive.download(&db, &file.id).unwrap();
        assert_eq!(download.file_name, "undangan.txt");
        assert_eq!(download.bytes, b"surat undangan");
    }

    #[test]
    fn newest_upload_comes_first_and_filters_apply() {
        let mut db = Database::open(Arc::new(MemoryMedium::new())).unwrap();
        let mut archive = Archive::open(&db).unwrap();
        archive
            .upload(&mut db, request("Laporan Keuangan.pdf", ArchiveCategory::Finance))
            .unwrap();
        archive
            .upload(&mut db, request("Surat Tugas.pdf", ArchiveCategory::Letter))
            .unwrap();
        assert_eq!(archive.files()[0].name, "Surat Tugas.pdf");

        archive.reload(&db).unwrap();
        assert_eq!(archive.files()[0].name, "Surat Tugas.pdf");

        archive.filter.search = "LAPORAN".to_string();
        assert_eq!(archive.filtered().len(), 1);
        archive.filter.category = Some(ArchiveCategory::Letter);
        assert!(archive.filtered().is_empty());
    }

    #[test]
    fn missing_file_is_not_found() {
        let db = Database::open(Arc::new(MemoryMedium::new())).unwrap();
        let archive = Archive::open(&db).unwrap();
        assert!(matches!(
            archive.download(&db, "file-1"),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn describe_includes_size_in_kb() {
        let file = ArchiveFile {
            id: "file-1".to_string(),
            name: "a.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size: 1536,
            category: ArchiveCategory::Administration,
            data: String::new(),
            created_at: 0,
        };
        assert!(describe(&file).starts_with("Administrasi - 1.50 KB - "));
    }
}
