//! TCP Server
//!
//! Accepts connections and serves each one on its own thread.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::sync::WaitGroup;
use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::persistence::Persistence;
use crate::protocol::{write_response, Response};
use crate::service::KvService;

use super::Connection;

/// Cloneable handle that asks a running server to stop
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Request shutdown; the server finishes within one accept poll interval
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_shutdown(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Why a stream was not admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Refusal {
    Full,
    Closed,
}

/// Open client streams, so shutdown can unblock threads stuck in a read
#[derive(Default)]
struct ConnectionRegistry {
    next_id: AtomicU64,
    streams: Mutex<Registered>,
}

#[derive(Default)]
struct Registered {
    closed: bool,
    open: HashMap<u64, TcpStream>,
}

impl ConnectionRegistry {
    /// Track a stream, up to `limit` open at once
    fn register(
        &self,
        stream: &TcpStream,
        limit: usize,
    ) -> Result<std::result::Result<u64, Refusal>> {
        let mut streams = self.streams.lock();
        if streams.closed {
            return Ok(Err(Refusal::Closed));
        }
        if streams.open.len() >= limit {
            return Ok(Err(Refusal::Full));
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        streams.open.insert(id, stream.try_clone()?);
        Ok(Ok(id))
    }

    fn remove(&self, id: u64) {
        self.streams.lock().open.remove(&id);
    }

    fn close_all(&self) {
        let mut streams = self.streams.lock();
        streams.closed = true;
        for (_, stream) in streams.open.drain() {
            let _ = stream.shutdown(Shutdown::Both);
        }
    }
}

/// TCP server for psstore
///
/// ## Lifecycle
/// 1. `bind`: run the restore hook, then open the listener
/// 2. `run`: accept until shutdown; every admitted connection is registered,
///    then served on its own thread. The acceptor never blocks on a client.
/// 3. on shutdown: stop accepting, close open connections, wait for their
///    threads, run the backup hook
pub struct Server {
    config: Config,
    service: Arc<KvService>,
    persistence: Arc<dyn Persistence>,
    listener: TcpListener,
    shutdown: ShutdownHandle,
    registry: Arc<ConnectionRegistry>,
}

impl Server {
    /// Restore state and bind the listener
    ///
    /// The listener is opened only after `restore` returns, so no client
    /// can observe a partially restored store.
    pub fn bind(
        config: Config,
        service: Arc<KvService>,
        persistence: Arc<dyn Persistence>,
    ) -> Result<Self> {
        if config.max_connections == 0 {
            return Err(StoreError::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }

        persistence.restore(service.ints().store(), service.strs().store())?;

        let listener = TcpListener::bind(&config.listen_addr).map_err(|e| {
            StoreError::Network(format!("failed to bind {}: {}", config.listen_addr, e))
        })?;
        // Non-blocking accept so the loop can notice shutdown requests
        listener.set_nonblocking(true)?;

        Ok(Self {
            config,
            service,
            persistence,
            listener,
            shutdown: ShutdownHandle::default(),
            registry: Arc::new(ConnectionRegistry::default()),
        })
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Handle for stopping the server from another thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Start the server (blocking until shutdown)
    pub fn run(self) -> Result<()> {
        tracing::info!("Listening on {}", self.local_addr()?);

        let connections = WaitGroup::new();
        let poll = Duration::from_millis(self.config.accept_poll_ms.max(1));

        while !self.shutdown.is_shutdown() {
            match self.listener.accept() {
                Ok((stream, addr)) => {
                    tracing::trace!("Accepted connection from {}", addr);
                    if let Err(e) = self.admit(stream, connections.clone()) {
                        tracing::warn!("Dropping connection from {}: {}", addr, e);
                    }
                }
                Err(ref e) if e.kind() == ErrorKind::WouldBlock => thread::sleep(poll),
                Err(e) => {
                    tracing::warn!("Accept failed: {}", e);
                    thread::sleep(poll);
                }
            }
        }

        tracing::info!("Shutting down, closing open connections");
        self.registry.close_all();
        connections.wait();

        self.persistence
            .backup(self.service.ints().store(), self.service.strs().store())?;
        tracing::info!("Server stopped");

        Ok(())
    }

    /// Register a stream and hand it to a fresh connection thread
    fn admit(&self, stream: TcpStream, guard: WaitGroup) -> Result<()> {
        stream.set_nonblocking(false)?;

        let id = match self.registry.register(&stream, self.config.max_connections)? {
            Ok(id) => id,
            Err(refusal) => {
                refuse(stream, refusal, self.config.max_connections);
                return Ok(());
            }
        };

        let service = Arc::clone(&self.service);
        let registry = Arc::clone(&self.registry);
        let read_ms = self.config.read_timeout_ms;
        let write_ms = self.config.write_timeout_ms;

        let spawned = thread::Builder::new()
            .name(format!("psstore-conn-{}", id))
            .spawn(move || {
                let result = Connection::new(stream, service).and_then(|mut conn| {
                    conn.set_timeouts(read_ms, write_ms)?;
                    conn.handle()
                });
                registry.remove(id);
                if let Err(e) = result {
                    tracing::warn!("Connection ended with error: {}", e);
                }
                drop(guard);
            });

        if let Err(e) = spawned {
            self.registry.remove(id);
            return Err(e.into());
        }
        Ok(())
    }
}

/// Tell the client why it is being turned away, then hang up
fn refuse(mut stream: TcpStream, refusal: Refusal, limit: usize) {
    if refusal == Refusal::Full {
        tracing::warn!("Connection limit ({}) reached, refusing client", limit);
        let err = StoreError::Network(format!("server busy: connection limit {} reached", limit));
        let _ = stream.set_write_timeout(Some(Duration::from_millis(500)));
        let _ = write_response(&mut stream, &Response::error(&err));
    }
    let _ = stream.shutdown(Shutdown::Both);
}
