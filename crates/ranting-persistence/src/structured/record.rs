//! Records that live in an object store.

use ranting_model::{ArchiveFile, Kader, Report};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record kind held in its own object store, keyed by a string id.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Object store name; also the key namespace on the medium.
    const STORE: &'static str;

    /// Secondary indexes maintained for this kind.
    const INDEXES: &'static [&'static str] = &[];

    /// Primary id.
    fn id(&self) -> &str;

    /// Value of the named secondary index for this record.
    fn index_value(&self, _index: &str) -> Option<String> {
        None
    }
}

impl Record for ArchiveFile {
    const STORE: &'static str = "digitalArchive";
    const INDEXES: &'static [&'static str] = &["category"];

    fn id(&self) -> &str {
        &self.id
    }

    fn index_value(&self, index: &str) -> Option<String> {
        match index {
            "category" => Some(self.category.as_str().to_string()),
            _ => None,
        }
    }
}

impl Record for Kader {
    const STORE: &'static str = "kaderMap";
    const INDEXES: &'static [&'static str] = &["position", "expertise", "interests"];

    fn id(&self) -> &str {
        &self.id
    }

    fn index_value(&self, index: &str) -> Option<String> {
        match index {
            "position" => Some(self.position.clone()),
            "expertise" => Some(self.expertise.clone()),
            "interests" => Some(self.interests.clone()),
            _ => None,
        }
    }
}

impl Record for Report {
    const STORE: &'static str = "reports";
    const INDEXES: &'static [&'static str] = &["year"];

    fn id(&self) -> &str {
        &self.id
    }

    fn index_value(&self, index: &str) -> Option<String> {
        match index {
            "year" => Some(self.year.to_string()),
            _ => None,
        }
    }
}
