//! Persistence hooks
//!
//! `restore` runs once before the listener opens, so no request can observe
//! a partially restored store. `backup` runs once after the last connection
//! has finished, so it sees a quiescent snapshot of both stores.

use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::error::Result;
use crate::store::Store;

/// Startup/shutdown extension points for the two stores
pub trait Persistence: Send + Sync {
    /// Populate both stores from previously saved state
    fn restore(&self, ints: &Store<i32>, strs: &Store<String>) -> Result<()>;

    /// Save both stores before the process exits
    fn backup(&self, ints: &Store<i32>, strs: &Store<String>) -> Result<()>;
}

/// Hooks that do nothing; the server default
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPersistence;

impl Persistence for NoopPersistence {
    fn restore(&self, _ints: &Store<i32>, _strs: &Store<String>) -> Result<()> {
        Ok(())
    }

    fn backup(&self, _ints: &Store<i32>, _strs: &Store<String>) -> Result<()> {
        Ok(())
    }
}

/// Saved contents of both stores
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub ints: BTreeMap<String, i32>,
    pub strs: BTreeMap<String, String>,
}

/// Keeps the latest backup in memory and restores from it
///
/// Useful for embedding the server in-process and for exercising the
/// hook ordering without an on-disk format.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    saved: Mutex<Option<Snapshot>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            saved: Mutex::new(Some(snapshot)),
        }
    }

    /// The most recent backup, if any
    pub fn saved(&self) -> Option<Snapshot> {
        self.saved.lock().clone()
    }
}

impl Persistence for MemoryPersistence {
    fn restore(&self, ints: &Store<i32>, strs: &Store<String>) -> Result<()> {
        let saved = self.saved.lock();
        if let Some(snapshot) = saved.as_ref() {
            let restored_ints = ints.load(snapshot.ints.clone());
            let restored_strs = strs.load(snapshot.strs.clone());
            tracing::info!(
                "Restored {} int entries and {} str entries",
                restored_ints,
                restored_strs
            );
        }
        Ok(())
    }

    fn backup(&self, ints: &Store<i32>, strs: &Store<String>) -> Result<()> {
        let snapshot = Snapshot {
            ints: ints.snapshot(),
            strs: strs.snapshot(),
        };
        tracing::info!(
            "Backed up {} int entries and {} str entries",
            snapshot.ints.len(),
            snapshot.strs.len()
        );
        *self.saved.lock() = Some(snapshot);
        Ok(())
    }
}
