//! Keyed blob tier: whole collections stored under logical names.
//!
//! Each collection is serialized as one JSON document. Loads never fail; a
//! missing or malformed blob yields the caller's default plus a warning.

mod blob;
mod collection;
mod store;
mod tracker;

pub use blob::{Loaded, blob_key, load_async, read_blob, save_async, write_blob};
pub use collection::SyncedCollection;
pub use store::{ChangeEvent, KeyedStore};
pub use tracker::DirtyTracker;

/// Program tracker items.
pub const PROGRAMS_KEY: &str = "programs";

/// Generated work plans.
pub const RENJA_PLANS_KEY: &str = "renja_plans";

/// Monthly impact rows.
pub const IMPACT_DATA_KEY: &str = "impact_data";
