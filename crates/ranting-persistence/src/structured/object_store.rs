//! Object store: per-record persistence with derived secondary indexes.

use std::marker::PhantomData;

use super::record::Record;
use crate::error::{PersistenceError, Result};
use crate::medium::SharedMedium;

/// Durable storage for one record kind, keyed by primary id.
///
/// Each record is stored at `"{STORE}/{id}"`. Secondary indexes are derived
/// from the medium on every lookup, so writes made through another handle on
/// the same medium are visible without a reload; callers never maintain them.
#[derive(Debug)]
pub struct ObjectStore<R: Record> {
    medium: SharedMedium,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> ObjectStore<R> {
    /// Open the store over `medium`, logging any record it cannot read.
    pub fn open(medium: SharedMedium) -> Result<Self> {
        let store = Self {
            medium,
            _record: PhantomData,
        };
        let records = store.scan()?;
        tracing::debug!(store = R::STORE, records = records.len(), "store opened");
        Ok(store)
    }

    /// Store name.
    pub fn name(&self) -> &'static str {
        R::STORE
    }

    /// Insert a new record. Fails with [`PersistenceError::DuplicateKey`] when the id exists.
    pub fn insert(&mut self, record: &R) -> Result<()> {
        let key = Self::key(record.id());
        if self.medium.read(&key)?.is_some() {
            return Err(PersistenceError::DuplicateKey {
                store: R::STORE,
                id: record.id().to_string(),
            });
        }
        self.write(&key, record)?;
        tracing::info!(store = R::STORE, id = record.id(), "record inserted");
        Ok(())
    }

    /// Overwrite the record with the same id, inserting it when absent.
    pub fn update(&mut self, record: &R) -> Result<()> {
        let key = Self::key(record.id());
        self.write(&key, record)?;
        tracing::info!(store = R::STORE, id = record.id(), "record updated");
        Ok(())
    }

    /// Remove a record. Removing an unknown id is a no-op.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.medium.remove(&Self::key(id))?;
        tracing::info!(store = R::STORE, id, "record deleted");
        Ok(())
    }

    /// Fetch a record by id; `None` when missing.
    pub fn get_by_id(&self, id: &str) -> Result<Option<R>> {
        let key = Self::key(id);
        self.medium
            .read(&key)?
            .map(|raw| parse(&key, &raw))
            .transpose()
    }

    /// Every readable record of this kind, in ascending key order.
    ///
    /// Malformed records are skipped and stay on the medium untouched.
    /// Callers sort by their own criteria; the order is not part of the contract.
    pub fn get_all(&self) -> Result<Vec<R>> {
        self.scan()
    }

    /// Records whose `index` value equals `value`.
    pub fn get_by_index(&self, index: &str, value: &str) -> Result<Vec<R>> {
        if !R::INDEXES.iter().any(|name| *name == index) {
            return Err(PersistenceError::UnknownIndex {
                store: R::STORE,
                index: index.to_string(),
            });
        }
        let mut records = self.scan()?;
        records.retain(|record| record.index_value(index).as_deref() == Some(value));
        tracing::debug!(store = R::STORE, index, value, matched = records.len(), "index lookup");
        Ok(records)
    }

    fn scan(&self) -> Result<Vec<R>> {
        let mut records = Vec::new();
        for key in self.medium.keys(&Self::prefix())? {
            let Some(raw) = self.medium.read(&key)? else {
                continue;
            };
            match parse(&key, &raw) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(store = R::STORE, %key, error = %e, "skipping malformed record");
                }
            }
        }
        Ok(records)
    }

    fn write(&self, key: &str, record: &R) -> Result<()> {
        let raw = serde_json::to_string(record).map_err(|source| {
            PersistenceError::Serialization {
                key: key.to_string(),
                source,
            }
        })?;
        self.medium.write(key, &raw)
    }

    fn prefix() -> String {
        format!("{}/", R::STORE)
    }

    fn key(id: &str) -> String {
        format!("{}/{}", R::STORE, id)
    }
}

fn parse<R: Record>(key: &str, raw: &str) -> Result<R> {
    serde_json::from_str(raw).map_err(|source| PersistenceError::Parse {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ranting_model::{Kader, Month, Report};

    use super::*;
    use crate::medium::{MemoryMedium, StorageMedium};

    fn report(year: i32, month: Month, name: &str) -> Report {
        Report {
            id: ranting_model::month_key(year, month),
            month,
            year,
            activity_name: name.to_string(),
            photos: vec![],
            attendees: 10,
            involved_kader: 2,
            notes: String::new(),
        }
    }

    fn kader(id: &str, position: &str) -> Kader {
        Kader {
            id: id.to_string(),
            name: format!("Member {id}"),
            position: position.to_string(),
            ..Kader::default()
        }
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let mut store = ObjectStore::<Kader>::open(Arc::new(MemoryMedium::new())).unwrap();
        store.insert(&kader("k1", "Ketua")).unwrap();
        let err = store.insert(&kader("k1", "Sekretaris")).unwrap_err();
        assert!(matches!(err, PersistenceError::DuplicateKey { store: "kaderMap", .. }));
        assert_eq!(store.get_by_id("k1").unwrap().unwrap().position, "Ketua");
    }

    #[test]
    fn year_index_follows_updates() {
        let mut store = ObjectStore::<Report>::open(Arc::new(MemoryMedium::new())).unwrap();
        let mut march = report(2024, Month::March, "Yasinan");
        store.insert(&march).unwrap();
        store.insert(&report(2023, Month::May, "Bahtsul Masail")).unwrap();
        assert_eq!(store.get_by_index("year", "2024").unwrap().len(), 1);

        march.year = 2023;
        store.update(&march).unwrap();
        assert!(store.get_by_index("year", "2024").unwrap().is_empty());
        assert_eq!(store.get_by_index("year", "2023").unwrap().len(), 2);
    }

    #[test]
    fn delete_clears_index_and_is_idempotent() {
        let mut store = ObjectStore::<Kader>::open(Arc::new(MemoryMedium::new())).unwrap();
        store.insert(&kader("k1", "Ketua")).unwrap();
        store.delete("k1").unwrap();
        store.delete("k1").unwrap();
        assert_eq!(store.get_by_id("k1").unwrap(), None);
        assert!(store.get_by_index("position", "Ketua").unwrap().is_empty());
    }

    #[test]
    fn get_all_skips_malformed_records() {
        let medium = MemoryMedium::new();
        let mut store = ObjectStore::<Kader>::open(Arc::new(medium.clone())).unwrap();
        store.insert(&kader("k1", "Ketua")).unwrap();
        store.insert(&kader("k2", "Bendahara")).unwrap();
        medium.write("kaderMap/broken", "{oops").unwrap();

        let ids: Vec<_> = store.get_all().unwrap().into_iter().map(|k| k.id).collect();
        assert_eq!(ids, vec!["k1", "k2"]);
        assert_eq!(medium.read("kaderMap/broken").unwrap().as_deref(), Some("{oops"));
        assert!(matches!(
            store.get_by_id("broken"),
            Err(PersistenceError::Parse { .. })
        ));
    }

    #[test]
    fn index_sees_writes_from_another_handle() {
        let medium = MemoryMedium::new();
        let mut writer = ObjectStore::<Report>::open(Arc::new(medium.clone())).unwrap();
        let reader = ObjectStore::<Report>::open(Arc::new(medium)).unwrap();

        let mut march = report(2024, Month::March, "Yasinan");
        writer.insert(&march).unwrap();
        assert_eq!(reader.get_by_index("year", "2024").unwrap().len(), 1);

        march.year = 2023;
        writer.update(&march).unwrap();
        assert!(reader.get_by_index("year", "2024").unwrap().is_empty());
        assert_eq!(reader.get_by_index("year", "2023").unwrap().len(), 1);

        writer.delete(&march.id).unwrap();
        assert!(reader.get_by_index("year", "2023").unwrap().is_empty());
    }

    #[test]
    fn open_reads_existing_records_from_medium() {
        let medium = MemoryMedium::new();
        {
            let mut store = ObjectStore::<Kader>::open(Arc::new(medium.clone())).unwrap();
            store.insert(&kader("k1", "Ketua")).unwrap();
            store.insert(&kader("k2", "Ketua")).unwrap();
        }
        medium.write("kaderMap/broken", "{oops").unwrap();
        let store = ObjectStore::<Kader>::open(Arc::new(medium)).unwrap();
        assert_eq!(store.get_by_index("position", "Ketua").unwrap().len(), 2);
    }

    #[test]
    fn unknown_index_is_an_error() {
        let store = ObjectStore::<Report>::open(Arc::new(MemoryMedium::new())).unwrap();
        assert!(matches!(
            store.get_by_index("month", "Maret"),
            Err(PersistenceError::UnknownIndex { .. })
        ));
    }

    #[test]
    fn failed_write_stores_nothing() {
        let medium = MemoryMedium::new();
        let mut store = ObjectStore::<Kader>::open(Arc::new(medium.clone())).unwrap();
        medium.fail_writes(true);
        assert!(store.insert(&kader("k1", "Ketua")).unwrap_err().is_unavailable());
        medium.fail_writes(false);
        assert!(store.get_by_index("position", "Ketua").unwrap().is_empty());
        assert!(store.get_all().unwrap().is_empty());
    }
}
