//! Store Module
//!
//! Typed in-memory stores, one instance per value domain.
//!
//! ## Responsibilities
//! - Own the key → value map for a single domain
//! - Serialize all mutations behind one reader/writer lock
//! - Decide, per entry, whether an Add or Update is accepted
//! - Report bulk rejections in submission order
//!
//! ## Locking
//! ```text
//!   add/update/delete/clear ──► write lock (decide + mutate together)
//!   get/len/snapshot        ──► read lock
//!   bulk_add/bulk_update    ──► read lock (classify) ─► write lock (apply)
//! ```
//!
//! The bulk path releases the read lock before taking the write lock, so a
//! single-key operation can land between the two phases and invalidate a
//! decision that was already made. Rejections always reflect the snapshot
//! seen during classification.

mod decision;
mod entry;
mod table;

pub use decision::{classify, decide, Mode};
pub use entry::{BulkReply, BulkRequest, CheckedEntry, InsertRequest};
pub use table::Store;
