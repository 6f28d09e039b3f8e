//! Mapping between value types and their wire domain.

use std::fmt::Debug;

use crate::store::InsertRequest;

use super::{Command, Domain, Op, Response};

/// A value type that has its own domain on the wire
pub trait DomainValue: Clone + Debug + Send + Sync + 'static {
    /// Domain this value type is served under
    const DOMAIN: Domain;

    /// Wrap an operation in the command for this domain
    fn command(op: Op<Self>) -> Command;

    /// Response carrying a Get result
    fn into_response(self) -> Response;

    /// Response carrying a bulk rejection list
    fn rejects_response(rejects: Vec<InsertRequest<Self>>) -> Response;

    /// Extract a Get result; `Err` hands back any other response
    fn from_response(response: Response) -> Result<Self, Response>;

    /// Extract a bulk rejection list; `Err` hands back any other response
    fn rejects_from_response(response: Response) -> Result<Vec<InsertRequest<Self>>, Response>;
}

impl DomainValue for i32 {
    const DOMAIN: Domain = Domain::Int;

    fn command(op: Op<Self>) -> Command {
        Command::Int(op)
    }

    fn into_response(self) -> Response {
        Response::Int(self)
    }

    fn rejects_response(rejects: Vec<InsertRequest<Self>>) -> Response {
        Response::IntRejects(rejects)
    }

    fn from_response(response: Response) -> Result<Self, Response> {
        match response {
            Response::Int(value) => Ok(value),
            other => Err(other),
        }
    }

    fn rejects_from_response(response: Response) -> Result<Vec<InsertRequest<Self>>, Response> {
        match response {
            Response::IntRejects(rejects) => Ok(rejects),
            other => Err(other),
        }
    }
}

impl DomainValue for String {
    const DOMAIN: Domain = Domain::Str;

    fn command(op: Op<Self>) -> Command {
        Command::Str(op)
    }

    fn into_response(self) -> Response {
        Response::Str(self)
    }

    fn rejects_response(rejects: Vec<InsertRequest<Self>>) -> Response {
        Response::StrRejects(rejects)
    }

    fn from_response(response: Response) -> Result<Self, Response> {
        match response {
            Response::Str(value) => Ok(value),
            other => Err(other),
        }
    }

    fn rejects_from_response(response: Response) -> Result<Vec<InsertRequest<Self>>, Response> {
        match response {
            Response::StrRejects(rejects) => Ok(rejects),
            other => Err(other),
        }
    }
}
