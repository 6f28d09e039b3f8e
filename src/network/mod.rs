//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor thread (non-blocking, polls the shutdown flag)
//! - One thread per admitted connection, capped by `max_connections`
//! - Open streams tracked so shutdown can close them and wait
//! - Commands routed through `KvService`

mod server;
mod connection;
mod client;

pub use server::{Server, ShutdownHandle};
pub use connection::Connection;
pub use client::Client;
