//! Service facade over both value domains.

use std::sync::Arc;

use crate::protocol::{Command, Response};
use crate::store::Store;

use super::DomainService;

/// Routes commands to the integer or string domain
///
/// Both stores are created by the caller and passed in, so the same
/// instances can be handed to the persistence hooks.
pub struct KvService {
    ints: DomainService<i32>,
    strs: DomainService<String>,
}

impl KvService {
    pub fn new(ints: Arc<Store<i32>>, strs: Arc<Store<String>>) -> Self {
        Self {
            ints: DomainService::new(ints),
            strs: DomainService::new(strs),
        }
    }

    /// Service over two fresh, empty stores
    pub fn in_memory() -> Self {
        Self::new(Arc::new(Store::new()), Arc::new(Store::new()))
    }

    /// Execute a command
    ///
    /// Routes commands to the domain they target
    pub fn execute(&self, command: Command) -> Response {
        match command {
            Command::Int(op) => self.ints.execute(op),
            Command::Str(op) => self.strs.execute(op),
            Command::Ping => Response::Pong,
        }
    }

    /// Operations on the integer-valued store
    pub fn ints(&self) -> &DomainService<i32> {
        &self.ints
    }

    /// Operations on the string-valued store
    pub fn strs(&self) -> &DomainService<String> {
        &self.strs
    }
}
