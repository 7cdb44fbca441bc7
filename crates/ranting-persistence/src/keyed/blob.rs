//! Whole-collection reads and writes against a medium.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{PersistenceError, Result};
use crate::medium::SharedMedium;

/// Medium namespace for keyed blobs.
pub(crate) const BLOB_NAMESPACE: &str = "local";

/// Medium key for a logical blob name.
pub fn blob_key(name: &str) -> String {
    format!("{BLOB_NAMESPACE}/{name}")
}

/// Outcome of a soft-failing load.
#[derive(Debug)]
pub struct Loaded<T> {
    /// The persisted value, or the default when it was absent or unreadable.
    pub value: T,
    /// Why the default was substituted, when that happened because of a failure.
    pub warning: Option<PersistenceError>,
}

impl<T> Loaded<T> {
    /// True when the value came from the medium.
    pub fn is_clean(&self) -> bool {
        self.warning.is_none()
    }
}

/// Read and parse the blob `name`, substituting `default` when it is absent,
/// unreadable or malformed. A malformed value is left on the medium.
pub fn read_blob<T: DeserializeOwned>(medium: &SharedMedium, name: &str, default: T) -> Loaded<T> {
    let key = blob_key(name);
    let raw = match medium.read(&key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            return Loaded {
                value: default,
                warning: None,
            };
        }
        Err(e) => {
            tracing::warn!(key = name, error = %e, "blob read failed; using default");
            return Loaded {
                value: default,
                warning: Some(e),
            };
        }
    };
    decode_blob(name, &raw, default)
}

/// Parse a raw blob value, substituting `default` on failure.
pub(crate) fn decode_blob<T: DeserializeOwned>(name: &str, raw: &str, default: T) -> Loaded<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Loaded {
            value,
            warning: None,
        },
        Err(source) => {
            tracing::warn!(key = name, error = %source, "stored blob is malformed; using default");
            Loaded {
                value: default,
                warning: Some(PersistenceError::Parse {
                    key: name.to_string(),
                    source,
                }),
            }
        }
    }
}

/// Serialize and write the blob `name`. Returns the raw value written.
pub fn write_blob<T: Serialize + ?Sized>(medium: &SharedMedium, name: &str, value: &T) -> Result<String> {
    let raw = serde_json::to_string(value).map_err(|source| PersistenceError::Serialization {
        key: name.to_string(),
        source,
    })?;
    medium.write(&blob_key(name), &raw)?;
    tracing::debug!(key = name, bytes = raw.len(), "blob saved");
    Ok(raw)
}

/// Load a blob without blocking the async runtime.
///
/// Spawns the read on the blocking thread pool.
pub async fn load_async<T>(medium: SharedMedium, name: String, default: T) -> Result<Loaded<T>>
where
    T: DeserializeOwned + Send + 'static,
{
    tokio::task::spawn_blocking(move || read_blob(&medium, &name, default))
        .await
        .map_err(|source| PersistenceError::TaskFailed { source })
}

/// Save a blob without blocking the async runtime.
pub async fn save_async<T>(medium: SharedMedium, name: String, value: T) -> Result<()>
where
    T: Serialize + Send + 'static,
{
    tokio::task::spawn_blocking(move || write_blob(&medium, &name, &value).map(|_| ()))
        .await
        .map_err(|source| PersistenceError::TaskFailed { source })?
}
