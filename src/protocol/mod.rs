//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Frame Format
//! ```text
//! ┌───────────┬──────────┬──────────┬─────────────────────────────┐
//! │Version (1)│ Len (4)  │ CRC (4)  │   Payload (bincode)         │
//! └───────────┴──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Commands
//! One operation group per domain (`Int`, `Str`):
//! Add, Update, BulkAdd, BulkUpdate, Get, Delete, Clear. Plus `Ping`.
//!
//! ### Responses
//! - `Done`: success marker
//! - `Int` / `Str`: value for Get
//! - `IntRejects` / `StrRejects`: rejected entries of a bulk operation
//! - `Pong`
//! - `Error`: kind + offending key + message

mod command;
mod response;
mod codec;
mod value;

pub use command::{Command, Domain, Op};
pub use response::{ErrorKind, Response};
pub use value::DomainValue;
pub use codec::{
    decode_command, decode_response, encode_command, encode_response, read_command,
    read_response, write_command, write_response, HEADER_SIZE, MAX_PAYLOAD_SIZE,
    PROTOCOL_VERSION,
};
