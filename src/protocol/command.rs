//! Command definitions
//!
//! Represents requests from clients, one operation group per value domain.

use serde::{Deserialize, Serialize};

use crate::store::{BulkRequest, InsertRequest};

/// Value domains served by psstore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// 32-bit signed integers
    Int,

    /// Strings
    Str,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Int => "int",
            Domain::Str => "str",
        }
    }
}

/// An operation against one domain's store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op<V> {
    /// Insert a new key
    Add(InsertRequest<V>),

    /// Overwrite an existing key
    Update(InsertRequest<V>),

    /// Insert many keys, reporting those already present
    BulkAdd(BulkRequest<V>),

    /// Overwrite many keys, reporting those that are absent
    BulkUpdate(BulkRequest<V>),

    /// Get a value by key
    Get { key: String },

    /// Delete a key
    Delete { key: String },

    /// Drop every entry in the domain
    Clear,
}

impl<V> Op<V> {
    /// Operation name, for logs
    pub fn name(&self) -> &'static str {
        match self {
            Op::Add(_) => "add",
            Op::Update(_) => "update",
            Op::BulkAdd(_) => "bulk_add",
            Op::BulkUpdate(_) => "bulk_update",
            Op::Get { .. } => "get",
            Op::Delete { .. } => "delete",
            Op::Clear => "clear",
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Operation on the integer-valued store
    Int(Op<i32>),

    /// Operation on the string-valued store
    Str(Op<String>),

    /// Ping (health check)
    Ping,
}

impl Command {
    /// The domain this command targets, if any
    pub fn domain(&self) -> Option<Domain> {
        match self {
            Command::Int(_) => Some(Domain::Int),
            Command::Str(_) => Some(Domain::Str),
            Command::Ping => None,
        }
    }

    /// Operation name, for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Int(op) => op.name(),
            Command::Str(op) => op.name(),
            Command::Ping => "ping",
        }
    }
}
