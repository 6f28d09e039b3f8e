//! Store implementation
//!
//! HashMap-based store with a parking_lot RwLock for concurrency.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;

use crate::error::{Result, StoreError};

use super::{classify, decide, BulkReply, InsertRequest, Mode};

/// Key → value map for one value domain
///
/// ## Concurrency:
/// - `data`: one RwLock per store, never shared between domains
/// - Single-key mutations decide and write under the same write guard
/// - Bulk mutations classify under a read guard, then apply under a write guard
/// - All methods use `&self`; share with `Arc<Store<V>>`
pub struct Store<V> {
    data: RwLock<HashMap<String, V>>,
}

impl<V: Clone> Store<V> {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    // =========================================================================
    // Single-key operations
    // =========================================================================

    /// Insert `value` under `key`; fails if the key is already present
    pub fn add(&self, key: &str, value: V) -> Result<()> {
        self.apply_one(key, value, Mode::Add)
    }

    /// Overwrite the value under `key`; fails if the key is absent
    pub fn update(&self, key: &str, value: V) -> Result<()> {
        self.apply_one(key, value, Mode::Update)
    }

    /// Get a copy of the value under `key`
    pub fn get(&self, key: &str) -> Result<V> {
        self.data
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::not_found(key))
    }

    /// Remove `key`; fails if the key is absent
    pub fn delete(&self, key: &str) -> Result<()> {
        match self.data.write().remove(key) {
            Some(_) => Ok(()),
            None => Err(StoreError::not_found(key)),
        }
    }

    /// Drop every entry
    ///
    /// Clearing a store that is already empty is an error, not a no-op.
    pub fn clear(&self) -> Result<()> {
        let mut data = self.data.write();
        if data.is_empty() {
            return Err(StoreError::EmptyStore);
        }
        // Fresh allocation so the old capacity is released too
        *data = HashMap::new();
        Ok(())
    }

    /// The N=1 case of the bulk path, decided and applied under one guard
    fn apply_one(&self, key: &str, value: V, mode: Mode) -> Result<()> {
        let mut data = self.data.write();
        if !decide(data.contains_key(key), mode) {
            return Err(mode.rejection(key));
        }
        data.insert(key.to_string(), value);
        Ok(())
    }

    // =========================================================================
    // Bulk operations
    // =========================================================================

    /// Add every entry whose key is absent; return the rest
    pub fn bulk_add(&self, entries: Vec<InsertRequest<V>>) -> BulkReply<V> {
        self.apply_bulk(entries, Mode::Add)
    }

    /// Update every entry whose key is present; return the rest
    pub fn bulk_update(&self, entries: Vec<InsertRequest<V>>) -> BulkReply<V> {
        self.apply_bulk(entries, Mode::Update)
    }

    fn apply_bulk(&self, entries: Vec<InsertRequest<V>>, mode: Mode) -> BulkReply<V> {
        // Phase 1: classify against a read snapshot
        let checked = {
            let data = self.data.read();
            classify(entries, mode, |key| data.contains_key(key))
        };

        // Phase 2: apply accepted entries, collect rejects in order
        let mut rejects = Vec::new();
        let mut data = self.data.write();
        for entry in checked {
            if entry.insert {
                data.insert(entry.key, entry.value);
            } else {
                rejects.push(entry.into_request());
            }
        }

        BulkReply { rejects }
    }

    // =========================================================================
    // Accessors (enumeration, persistence hooks, testing)
    // =========================================================================

    /// Check whether `key` is present
    pub fn contains(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// All keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.data.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Consistent copy of every entry, taken under a single read guard
    pub fn snapshot(&self) -> BTreeMap<String, V> {
        self.data
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Install entries in one write, overwriting existing keys
    ///
    /// Returns the number of entries loaded.
    pub fn load<I>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = (String, V)>,
    {
        let mut data = self.data.write();
        let mut count = 0;
        for (key, value) in entries {
            data.insert(key, value);
            count += 1;
        }
        count
    }
}

impl<V: Clone> Default for Store<V> {
    fn default() -> Self {
        Self::new()
    }
}
