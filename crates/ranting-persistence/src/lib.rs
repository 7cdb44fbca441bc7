//! Record store for the ranting dashboard.
//!
//! Two storage tiers share one [`StorageMedium`]:
//!
//! - **Structured tier** - one [`ObjectStore`] per record kind (archive files,
//!   member profiles, monthly reports), keyed by id, with secondary indexes
//!   derived from the stored records.
//! - **Keyed tier** - whole collections (programs, work plans, impact rows)
//!   serialized under a logical name by the [`KeyedStore`], with
//!   change notification across execution contexts.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use ranting_persistence::{Database, MemoryMedium, PROGRAMS_KEY};
//!
//! let mut db = Database::open(Arc::new(MemoryMedium::new()))?;
//! db.local().save(PROGRAMS_KEY, &vec!["Rapat Anggota"])?;
//! let loaded = db.local().load(PROGRAMS_KEY, Vec::<String>::new());
//! assert_eq!(loaded.value, vec!["Rapat Anggota".to_string()]);
//! # Ok::<(), ranting_persistence::PersistenceError>(())
//! ```
//!
//! # Architecture
//!
//! - `medium/` - Key/value media (in-memory, directory of JSON files)
//! - `structured/` - Object stores and secondary indexes
//! - `keyed/` - Blob store, change sync, dirty tracking
//! - `database.rs` - The dashboard's stores behind one handle
//! - `error.rs` - Error types with user-friendly messages

mod database;
mod error;
mod hash;
mod keyed;
mod medium;
mod structured;

pub use database::{Database, SCHEMA_VERSION};
pub use error::{PersistenceError, Result};
pub use hash::content_hash;
pub use keyed::{
    ChangeEvent, DirtyTracker, IMPACT_DATA_KEY, KeyedStore, Loaded, PROGRAMS_KEY, RENJA_PLANS_KEY,
    SyncedCollection, blob_key, load_async, read_blob, save_async, write_blob,
};
pub use medium::{DirectoryMedium, MemoryMedium, SharedMedium, StorageMedium};
pub use structured::{ObjectStore, Record};
