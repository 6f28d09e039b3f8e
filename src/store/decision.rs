//! Accept/reject decisions for Add and Update.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

use super::{CheckedEntry, InsertRequest};

/// Which precondition an insert is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Key must be absent
    Add,

    /// Key must be present
    Update,
}

impl Mode {
    /// Error returned by the single-key path when the decision is a rejection
    pub(crate) fn rejection(self, key: &str) -> StoreError {
        match self {
            Mode::Add => StoreError::exists(key),
            Mode::Update => StoreError::not_found(key),
        }
    }
}

/// Decide whether an entry should be written
///
/// Update does not compare values: an Update that rewrites the same value
/// is still accepted.
pub fn decide(present: bool, mode: Mode) -> bool {
    match mode {
        Mode::Add => !present,
        Mode::Update => present,
    }
}

/// Classify every entry against a membership test, preserving order
pub fn classify<V, F>(entries: Vec<InsertRequest<V>>, mode: Mode, is_present: F) -> Vec<CheckedEntry<V>>
where
    F: Fn(&str) -> bool,
{
    entries
        .into_iter()
        .map(|entry| {
            let insert = decide(is_present(&entry.key), mode);
            CheckedEntry {
                key: entry.key,
                value: entry.value,
                insert,
            }
        })
        .collect()
}
