//! Request and reply shapes shared by the store, the service and the wire.

use serde::{Deserialize, Serialize};

/// A single candidate entry for Add or Update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertRequest<V> {
    pub key: String,
    pub value: V,
}

impl<V> InsertRequest<V> {
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl<K: Into<String>, V> From<(K, V)> for InsertRequest<V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// An insert request annotated with the classification decision
///
/// Produced before any mutation so the classify pass and the write pass
/// can run under different locks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedEntry<V> {
    pub key: String,
    pub value: V,

    /// `true` if the entry should be written
    pub insert: bool,
}

impl<V> CheckedEntry<V> {
    /// Drop the decision and hand back the submitted request
    pub fn into_request(self) -> InsertRequest<V> {
        InsertRequest {
            key: self.key,
            value: self.value,
        }
    }
}

/// A bulk Add or Update request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRequest<V> {
    /// Entries in submission order
    pub entries: Vec<InsertRequest<V>>,

    /// Accepted for compatibility; does not change store semantics
    pub compressed: bool,
}

impl<V> BulkRequest<V> {
    pub fn new(entries: Vec<InsertRequest<V>>) -> Self {
        Self {
            entries,
            compressed: false,
        }
    }

    pub fn compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for BulkRequest<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(InsertRequest::from).collect())
    }
}

/// Result of a bulk operation: the entries that were not applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkReply<V> {
    /// Rejected entries, in the relative order they were submitted
    pub rejects: Vec<InsertRequest<V>>,
}

impl<V> BulkReply<V> {
    /// `true` if every entry was applied
    pub fn all_applied(&self) -> bool {
        self.rejects.is_empty()
    }
}

impl<V> Default for BulkReply<V> {
    fn default() -> Self {
        Self {
            rejects: Vec::new(),
        }
    }
}
