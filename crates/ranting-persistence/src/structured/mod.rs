//! Structured store: archive files, member profiles and reports.

mod object_store;
mod record;

pub use object_store::ObjectStore;
pub use record::Record;
