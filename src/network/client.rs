//! Blocking client
//!
//! Typed access to both domains over a single TCP connection.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use crate::error::{Result, StoreError};
use crate::protocol::{read_response, write_command, Command, DomainValue, Op, Response};
use crate::store::{BulkRequest, InsertRequest};

/// Client for a psstore server
///
/// Value-typed methods pick the domain from the value type:
/// `client.add("k", 5)` targets the integer store,
/// `client.add("k", "v".to_string())` the string store.
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    /// Connect to a server
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        let read_stream = stream.try_clone()?;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
        })
    }

    /// Send a command and wait for its response
    ///
    /// Error responses are returned as `Ok(Response::Error { .. })`.
    pub fn send(&mut self, command: &Command) -> Result<Response> {
        write_command(&mut self.writer, command)?;
        read_response(&mut self.reader)
    }

    /// Send a command; error responses become `Err`
    pub fn call(&mut self, command: &Command) -> Result<Response> {
        self.send(command)?.into_result()
    }

    pub fn ping(&mut self) -> Result<()> {
        match self.call(&Command::Ping)? {
            Response::Pong => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    pub fn add<V: DomainValue>(&mut self, key: &str, value: V) -> Result<()> {
        self.call_done(V::command(Op::Add(InsertRequest::new(key, value))))
    }

    pub fn update<V: DomainValue>(&mut self, key: &str, value: V) -> Result<()> {
        self.call_done(V::command(Op::Update(InsertRequest::new(key, value))))
    }

    /// Returns the rejected entries
    pub fn bulk_add<V: DomainValue>(&mut self, request: BulkRequest<V>) -> Result<Vec<InsertRequest<V>>> {
        let response = self.call(&V::command(Op::BulkAdd(request)))?;
        V::rejects_from_response(response).map_err(unexpected)
    }

    /// Returns the rejected entries
    pub fn bulk_update<V: DomainValue>(&mut self, request: BulkRequest<V>) -> Result<Vec<InsertRequest<V>>> {
        let response = self.call(&V::command(Op::BulkUpdate(request)))?;
        V::rejects_from_response(response).map_err(unexpected)
    }

    pub fn get<V: DomainValue>(&mut self, key: &str) -> Result<V> {
        let response = self.call(&V::command(Op::Get { key: key.to_string() }))?;
        V::from_response(response).map_err(unexpected)
    }

    pub fn delete<V: DomainValue>(&mut self, key: &str) -> Result<()> {
        self.call_done(V::command(Op::Delete { key: key.to_string() }))
    }

    pub fn clear<V: DomainValue>(&mut self) -> Result<()> {
        self.call_done(V::command(Op::Clear))
    }

    fn call_done(&mut self, command: Command) -> Result<()> {
        match self.call(&command)? {
            Response::Done => Ok(()),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(response: Response) -> StoreError {
    StoreError::Protocol(format!("unexpected response: {:?}", response))
}
