//! Directory-backed medium: one JSON file per key.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::StorageMedium;
use crate::error::{PersistenceError, Result};

const VALUE_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// Medium storing each key as a file under a root directory.
///
/// Key segments separated by `/` become sub-directories. Writes go to a temp
/// file that is synced and renamed over the target, so readers never observe
/// a partial value.
#[derive(Debug, Clone)]
pub struct DirectoryMedium {
    root: PathBuf,
}

impl DirectoryMedium {
    /// Open a medium rooted at `root`, creating the directory when missing.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            PersistenceError::unavailable("create directory", root.display().to_string(), e)
        })?;
        tracing::debug!(root = %root.display(), "opened directory medium");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let mut path = self.root.clone();
        let segments: Vec<&str> = key.split('/').collect();
        let last = segments.len().saturating_sub(1);
        for (position, segment) in segments.iter().enumerate() {
            let encoded = encode_segment(segment);
            if position == last {
                path.push(format!("{encoded}.{VALUE_EXTENSION}"));
            } else {
                path.push(encoded);
            }
        }
        path
    }

    fn collect_keys(
        &self,
        dir: &Path,
        segments: &mut Vec<String>,
        out: &mut Vec<String>,
    ) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                segments.push(decode_segment(&name));
                self.collect_keys(&entry.path(), segments, out)?;
                segments.pop();
            } else if let Some(stem) = name.strip_suffix(&format!(".{VALUE_EXTENSION}")) {
                let mut key = segments.join("/");
                if !key.is_empty() {
                    key.push('/');
                }
                key.push_str(&decode_segment(stem));
                out.push(key);
            }
        }
        Ok(())
    }
}

impl StorageMedium for DirectoryMedium {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::unavailable("read", key, e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let temp_path = path.with_extension(TEMP_EXTENSION);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| PersistenceError::unavailable("create directory", key, e))?;
        }

        let mut file = File::create(&temp_path)
            .map_err(|e| PersistenceError::unavailable("create", key, e))?;
        file.write_all(value.as_bytes())
            .map_err(|e| PersistenceError::unavailable("write", key, e))?;
        file.sync_all()
            .map_err(|e| PersistenceError::unavailable("sync", key, e))?;

        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(PersistenceError::unavailable("write", key, e));
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::unavailable("remove", key, e)),
        }
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        self.collect_keys(&self.root, &mut Vec::new(), &mut keys)
            .map_err(|e| PersistenceError::unavailable("list", prefix, e))?;
        keys.retain(|key| key.starts_with(prefix));
        keys.sort();
        Ok(keys)
    }
}

/// Percent-encode everything outside `[A-Za-z0-9_-]` so a key segment is a
/// safe file name (no separators, no `.`/`..`).
fn encode_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

fn decode_segment(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                decoded.push(byte);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_then_read() {
        let dir = tempdir().unwrap();
        let medium = DirectoryMedium::open(dir.path()).unwrap();
        medium.write("kaderMap/kader-1", "{\"id\":\"kader-1\"}").unwrap();
        assert_eq!(
            medium.read("kaderMap/kader-1").unwrap().as_deref(),
            Some("{\"id\":\"kader-1\"}")
        );
        assert!(dir.path().join("kaderMap").join("kader-1.json").exists());
    }

    #[test]
    fn missing_key_reads_none() {
        let dir = tempdir().unwrap();
        let medium = DirectoryMedium::open(dir.path()).unwrap();
        assert_eq!(medium.read("local/programs").unwrap(), None);
        medium.remove("local/programs").unwrap();
    }

    #[test]
    fn keys_decode_segments() {
        let dir = tempdir().unwrap();
        let medium = DirectoryMedium::open(dir.path()).unwrap();
        medium.write("reports/2024-3", "{}").unwrap();
        medium.write("digitalArchive/odd id.pdf", "{}").unwrap();
        medium.write("local/programs", "[]").unwrap();

        assert_eq!(
            medium.keys("digitalArchive/").unwrap(),
            vec!["digitalArchive/odd id.pdf".to_string()]
        );
        assert_eq!(medium.keys("").unwrap().len(), 3);
    }

    #[test]
    fn no_temp_file_left_after_write() {
        let dir = tempdir().unwrap();
        let medium = DirectoryMedium::open(dir.path()).unwrap();
        medium.write("local/impact_data", "[]").unwrap();
        let leftovers: Vec<_> = fs::read_dir(dir.path().join("local"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn segment_encoding_round_trips() {
        for raw in ["file-1700000000000", "../etc", "a b%c", "laporan.pdf"] {
            let encoded = encode_segment(raw);
            assert!(!encoded.contains('/') && !encoded.contains('.'));
            assert_eq!(decode_segment(&encoded), raw);
        }
    }
}
