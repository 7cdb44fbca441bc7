//! A collection bound to one blob name and kept in step with the medium.

use std::sync::mpsc::{Receiver, TryRecvError};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::store::{ChangeEvent, KeyedStore};
use super::tracker::DirtyTracker;
use crate::error::{PersistenceError, Result};

/// In-memory view of a keyed blob.
///
/// Local edits update memory first and are then persisted. A failed save
/// keeps the edited value in memory and marks the collection dirty, so the
/// displayed state and the persisted state differ until the next successful
/// save. External changes replace memory wholesale (last writer wins),
/// discarding unsaved local edits.
#[derive(Debug)]
pub struct SyncedCollection<T> {
    name: String,
    default: T,
    value: T,
    tracker: DirtyTracker,
    changes: Receiver<ChangeEvent>,
}

impl<T> SyncedCollection<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Load `name` from the store and subscribe to its external changes.
    ///
    /// Returns the collection and the warning raised while loading, if any.
    pub fn open(
        store: &mut KeyedStore,
        name: &str,
        default: T,
    ) -> (Self, Option<PersistenceError>) {
        let loaded = store.load(name, default.clone());
        let changes = store.subscribe(name);
        let collection = Self {
            name: name.to_string(),
            default,
            value: loaded.value,
            tracker: DirtyTracker::new(),
            changes,
        };
        (collection, loaded.warning)
    }

    /// Blob name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current in-memory value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Whether memory holds changes the medium does not.
    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    pub fn tracker(&self) -> &DirtyTracker {
        &self.tracker
    }

    /// Replace the value and persist it.
    ///
    /// The in-memory value is replaced even when the save fails.
    pub fn set(&mut self, store: &mut KeyedStore, value: T) -> Result<()> {
        self.value = value;
        self.tracker.mark_dirty();
        self.persist(store)
    }

    /// Edit the value in place and persist it.
    pub fn update<F>(&mut self, store: &mut KeyedStore, edit: F) -> Result<()>
    where
        F: FnOnce(&mut T),
    {
        edit(&mut self.value);
        self.tracker.mark_dirty();
        self.persist(store)
    }

    /// Retry persisting the current value.
    pub fn persist(&mut self, store: &mut KeyedStore) -> Result<()> {
        match store.save(&self.name, &self.value) {
            Ok(()) => {
                self.tracker.save_complete();
                Ok(())
            }
            Err(e) => {
                self.tracker.save_failed();
                tracing::error!(
                    key = %self.name,
                    failed_saves = self.tracker.failed_saves(),
                    error = %e,
                    "save failed; keeping unsaved value in memory"
                );
                Err(e)
            }
        }
    }

    /// Apply pending external changes. Returns true when memory was replaced.
    ///
    /// Call after [`KeyedStore::sync`]. Unparseable or removed values fall
    /// back to the default.
    pub fn refresh(&mut self) -> bool {
        let mut latest = None;
        loop {
            match self.changes.try_recv() {
                Ok(event) => latest = Some(event),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        match latest {
            Some(event) => {
                self.apply(&event);
                true
            }
            None => false,
        }
    }

    /// Replace memory with the value carried by `event`.
    pub fn apply(&mut self, event: &ChangeEvent) {
        if self.tracker.is_dirty() {
            tracing::warn!(
                key = %self.name,
                unsaved_ms = self.tracker.ms_since_first_unsaved(),
                "external change overwrites unsaved edits"
            );
        }
        let loaded = event.decode(self.default.clone());
        if let Some(warning) = &loaded.warning {
            tracing::warn!(key = %self.name, error = %warning, "external value unreadable; using default");
        }
        self.value = loaded.value;
        self.tracker.discard();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::medium::MemoryMedium;

    #[test]
    fn failed_save_keeps_memory_and_medium_apart() {
        let medium = MemoryMedium::new();
        let mut store = KeyedStore::new(Arc::new(medium.clone()));
        let (mut numbers, warning) = SyncedCollection::open(&mut store, "impact_data", vec![1u32]);
        assert!(warning.is_none());
        numbers.set(&mut store, vec![1, 2]).unwrap();

        medium.fail_writes(true);
        assert!(numbers.set(&mut store, vec![1, 2, 3]).is_err());
        assert_eq!(numbers.get(), &vec![1, 2, 3]);
        assert!(numbers.is_dirty());

        medium.fail_writes(false);
        let persisted = store.load("impact_data", Vec::<u32>::new()).value;
        assert_eq!(persisted, vec![1, 2]);

        numbers.persist(&mut store).unwrap();
        assert!(!numbers.is_dirty());
    }

    #[test]
    fn external_change_overwrites_local_edits() {
        let shared = MemoryMedium::new();
        let mut tab_a = KeyedStore::new(Arc::new(shared.clone()));
        let mut tab_b = KeyedStore::new(Arc::new(shared.clone()));

        let (mut a, _) = SyncedCollection::open(&mut tab_a, "programs", Vec::<String>::new());
        let (mut b, _) = SyncedCollection::open(&mut tab_b, "programs", Vec::<String>::new());

        shared.fail_writes(true);
        let _ = b.set(&mut tab_b, vec!["unsaved".to_string()]);
        shared.fail_writes(false);

        a.set(&mut tab_a, vec!["from a".to_string()]).unwrap();
        tab_b.sync();
        assert!(b.refresh());
        assert_eq!(b.get(), &vec!["from a".to_string()]);
        assert!(!b.is_dirty());
        assert!(!b.refresh());
    }
}
