//! Keyed blob store with change notification.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::mpsc::{Receiver, Sender, channel};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::blob::{Loaded, blob_key, decode_blob, write_blob};
use crate::error::Result;
use crate::hash::content_hash;
use crate::medium::SharedMedium;

/// A blob was changed on the medium by another execution context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Logical blob name (`programs`, `impact_data`, ...).
    pub key: String,
    /// New raw value, or `None` when the blob was removed.
    pub raw: Option<String>,
}

impl ChangeEvent {
    /// Decode the refreshed value, falling back to `default` when the blob
    /// was removed or cannot be parsed.
    pub fn decode<T: DeserializeOwned>(&self, default: T) -> Loaded<T> {
        match &self.raw {
            Some(raw) => decode_blob(&self.key, raw, default),
            None => Loaded {
                value: default,
                warning: None,
            },
        }
    }
}

/// Whole-collection persistence under logical names.
///
/// The store remembers a content hash of the last value it read or wrote for
/// each name. [`KeyedStore::sync`] compares those hashes against the medium and
/// notifies subscribers of every name that another context has changed. Writes
/// made through this store never notify its own subscribers.
#[derive(Debug)]
pub struct KeyedStore {
    medium: SharedMedium,
    /// Last observed content hash per name; inner `None` means absent.
    observed: BTreeMap<String, Option<String>>,
    subscribers: BTreeMap<String, Vec<Sender<ChangeEvent>>>,
}

impl KeyedStore {
    pub fn new(medium: SharedMedium) -> Self {
        Self {
            medium,
            observed: BTreeMap::new(),
            subscribers: BTreeMap::new(),
        }
    }

    /// Load the collection stored under `name`, or `default` when it is
    /// missing or unreadable. Never fails; see [`Loaded::warning`].
    ///
    /// The default is not persisted.
    pub fn load<T: DeserializeOwned>(&mut self, name: &str, default: T) -> Loaded<T> {
        match self.medium.read(&blob_key(name)) {
            Ok(raw) => {
                self.observe(name, raw.as_deref());
                match raw {
                    Some(raw) => decode_blob(name, &raw, default),
                    None => Loaded {
                        value: default,
                        warning: None,
                    },
                }
            }
            Err(e) => {
                tracing::warn!(key = name, error = %e, "blob read failed; using default");
                Loaded {
                    value: default,
                    warning: Some(e),
                }
            }
        }
    }

    /// Persist the whole collection under `name`.
    ///
    /// On failure the previously persisted value stays on the medium.
    pub fn save<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> Result<()> {
        let raw = write_blob(&self.medium, name, value)?;
        self.observe(name, Some(&raw));
        Ok(())
    }

    /// Receive a [`ChangeEvent`] whenever another context changes `name`.
    pub fn subscribe(&mut self, name: &str) -> Receiver<ChangeEvent> {
        let (sender, receiver) = channel();
        self.subscribers
            .entry(name.to_string())
            .or_default()
            .push(sender);
        receiver
    }

    /// Check every tracked name against the medium and notify subscribers of
    /// the ones that changed. Returns the changed names.
    ///
    /// A name seen for the first time only records a baseline. Names that
    /// cannot be read are skipped until the next sync.
    pub fn sync(&mut self) -> Vec<String> {
        let names: BTreeSet<String> = self
            .observed
            .keys()
            .chain(self.subscribers.keys())
            .cloned()
            .collect();

        let mut changed = Vec::new();
        for name in names {
            let raw = match self.medium.read(&blob_key(&name)) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(key = %name, error = %e, "skipping change check");
                    continue;
                }
            };
            let hash = raw.as_deref().map(content_hash);
            let previous = self.observed.insert(name.clone(), hash.clone());
            match previous {
                Some(previous) if previous != hash => {
                    tracing::info!(key = %name, "blob changed externally");
                    self.publish(&ChangeEvent {
                        key: name.clone(),
                        raw,
                    });
                    changed.push(name);
                }
                _ => {}
            }
        }
        changed
    }

    /// Medium this store writes to.
    pub fn medium(&self) -> &SharedMedium {
        &self.medium
    }

    fn observe(&mut self, name: &str, raw: Option<&str>) {
        self.observed
            .insert(name.to_string(), raw.map(content_hash));
    }

    fn publish(&mut self, event: &ChangeEvent) {
        if let Some(senders) = self.subscribers.get_mut(&event.key) {
            senders.retain(|sender| sender.send(event.clone()).is_ok());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::medium::MemoryMedium;

    #[test]
    fn own_saves_do_not_notify() {
        let mut store = KeyedStore::new(Arc::new(MemoryMedium::new()));
        let events = store.subscribe("programs");
        store.save("programs", &vec![1, 2]).unwrap();
        assert!(store.sync().is_empty());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn external_write_is_published() {
        let shared = MemoryMedium::new();
        let mut tab_a = KeyedStore::new(Arc::new(shared.clone()));
        let mut tab_b = KeyedStore::new(Arc::new(shared));

        let loaded: Loaded<Vec<u32>> = tab_b.load("impact_data", Vec::new());
        assert!(loaded.value.is_empty());
        let events = tab_b.subscribe("impact_data");

        tab_a.save("impact_data", &vec![5u32]).unwrap();
        assert_eq!(tab_b.sync(), vec!["impact_data".to_string()]);

        let event = events.try_recv().unwrap();
        assert_eq!(event.decode(Vec::<u32>::new()).value, vec![5]);
        assert!(tab_b.sync().is_empty());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let shared = MemoryMedium::new();
        let mut writer = KeyedStore::new(Arc::new(shared.clone()));
        let mut reader = KeyedStore::new(Arc::new(shared));
        reader.load("programs", Vec::<u32>::new());
        drop(reader.subscribe("programs"));

        writer.save("programs", &vec![1u32]).unwrap();
        reader.sync();
        assert!(reader.subscribers["programs"].is_empty());
    }

    #[test]
    fn removed_blob_decodes_to_default() {
        let event = ChangeEvent {
            key: "renja_plans".to_string(),
            raw: None,
        };
        assert_eq!(event.decode(vec![9u8]).value, vec![9]);
    }
}
