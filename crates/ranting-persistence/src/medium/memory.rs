//! In-memory medium.

use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use super::StorageMedium;
use crate::error::{PersistenceError, Result};

/// In-memory medium.
///
/// Clones share the same entries, so two clones behave like two execution
/// contexts looking at one browser profile. Reads and writes can be made to
/// fail to simulate a rejected or inaccessible medium.
#[derive(Debug, Clone, Default)]
pub struct MemoryMedium {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: BTreeMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write and remove fail until reset.
    pub fn fail_writes(&self, fail: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_writes = fail;
        }
    }

    /// Make every subsequent read and listing fail until reset.
    pub fn fail_reads(&self, fail: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_reads = fail;
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self, operation: &'static str, key: &str) -> Result<MutexGuard<'_, MemoryState>> {
        self.state.lock().map_err(|_| {
            PersistenceError::unavailable(operation, key, io::Error::other("medium lock poisoned"))
        })
    }
}

fn rejected(operation: &'static str, key: &str) -> PersistenceError {
    PersistenceError::unavailable(
        operation,
        key,
        io::Error::new(io::ErrorKind::PermissionDenied, "medium rejected the request"),
    )
}

impl StorageMedium for MemoryMedium {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let state = self.lock("read", key)?;
        if state.fail_reads {
            return Err(rejected("read", key));
        }
        Ok(state.entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut state = self.lock("write", key)?;
        if state.fail_writes {
            return Err(rejected("write", key));
        }
        state.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut state = self.lock("remove", key)?;
        if state.fail_writes {
            return Err(rejected("remove", key));
        }
        state.entries.remove(key);
        Ok(())
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>> {
        let state = self.lock("list", prefix)?;
        if state.fail_reads {
            return Err(rejected("list", prefix));
        }
        Ok(state
            .entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect())
    }
}
