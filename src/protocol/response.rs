//! Response definitions
//!
//! Represents responses to clients.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::InsertRequest;

/// Error categories carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    KeyNotFound,
    KeyExists,
    EmptyStore,
    UnsupportedArgument,

    /// Anything else that went wrong server-side
    Internal,
}

/// A response to send to client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    /// Success marker for Add, Update, Delete and Clear
    Done,

    /// Value for an integer Get
    Int(i32),

    /// Value for a string Get
    Str(String),

    /// Rejected entries of an integer bulk operation
    IntRejects(Vec<InsertRequest<i32>>),

    /// Rejected entries of a string bulk operation
    StrRejects(Vec<InsertRequest<String>>),

    /// Reply to Ping
    Pong,

    /// The operation failed
    Error {
        kind: ErrorKind,
        /// Offending key, for KeyNotFound and KeyExists
        key: Option<String>,
        message: String,
    },
}

impl Response {
    /// Create an ERROR response from a store error
    pub fn error(err: &StoreError) -> Self {
        let (kind, key) = match err {
            StoreError::KeyNotFound { key } => (ErrorKind::KeyNotFound, Some(key.clone())),
            StoreError::KeyExists { key } => (ErrorKind::KeyExists, Some(key.clone())),
            StoreError::EmptyStore => (ErrorKind::EmptyStore, None),
            StoreError::UnsupportedArgument(_)
            | StoreError::Serialization(_)
            | StoreError::Protocol(_) => (ErrorKind::UnsupportedArgument, None),
            _ => (ErrorKind::Internal, None),
        };

        // UnsupportedArgument is rebuilt client-side, so send only its detail
        let message = match err {
            StoreError::UnsupportedArgument(detail) => detail.clone(),
            other => other.to_string(),
        };

        Response::Error { kind, key, message }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }

    /// Turn an ERROR response back into a `StoreError`
    ///
    /// Any other response is passed through unchanged.
    pub fn into_result(self) -> Result<Response, StoreError> {
        match self {
            Response::Error { kind, key, message } => Err(match kind {
                ErrorKind::KeyNotFound => StoreError::not_found(key.unwrap_or_default()),
                ErrorKind::KeyExists => StoreError::exists(key.unwrap_or_default()),
                ErrorKind::EmptyStore => StoreError::EmptyStore,
                ErrorKind::UnsupportedArgument => StoreError::UnsupportedArgument(message),
                ErrorKind::Internal => StoreError::Network(message),
            }),
            other => Ok(other),
        }
    }
}

impl From<StoreError> for Response {
    fn from(err: StoreError) -> Self {
        Response::error(&err)
    }
}
