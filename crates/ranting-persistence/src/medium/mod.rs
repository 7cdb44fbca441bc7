//! Storage media: the persistent key/value layer under both store tiers.
//!
//! A medium maps string keys to string values. Keys use `/` to separate a
//! namespace from a name (`reports/2024-3`, `local/programs`).

mod directory;
mod memory;

use std::fmt;
use std::sync::Arc;

pub use directory::DirectoryMedium;
pub use memory::MemoryMedium;

use crate::error::Result;

/// Persistent key/value medium.
pub trait StorageMedium: Send + Sync + fmt::Debug {
    /// Read the value stored under `key`, or `None` when absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`. A failed write leaves the previous value intact.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<()>;

    /// All keys starting with `prefix`, in ascending order.
    fn keys(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Medium handle shared between stores.
pub type SharedMedium = Arc<dyn StorageMedium>;
