//! # psstore
//!
//! A concurrent in-process key-value store with:
//! - Two independent value domains (32-bit integers and strings)
//! - Single and bulk Add/Update with per-entry accept/reject decisions
//! - One reader/writer lock per domain
//! - TCP-based client protocol with restore/backup hooks
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │             (acceptor + worker thread pool)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     KvService                                │
//! │          (validate, route by domain, build Response)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │ Store<i32>  │          │Store<String> │
//!   │  (RwLock)   │          │  (RwLock)    │
//!   └─────────────┘          └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod service;
pub mod persistence;
pub mod network;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StoreError, Result};
pub use config::Config;
pub use service::KvService;
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of psstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
