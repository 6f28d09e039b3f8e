//! Service Module
//!
//! The named operations of each value domain, and the routing of decoded
//! commands onto them.
//!
//! ## Responsibilities
//! - Validate request arguments (non-empty keys)
//! - Forward to the domain's `Store`
//! - Translate results into `Response`s for the transport layer
//!
//! Bulk operations always succeed at the call level; per-entry rejections
//! are returned as data.

mod domain;
mod kv;

pub use domain::DomainService;
pub use kv::KvService;
