//! Connection to the lock server.
//!
//! A [`Locker`] owns one lazily opened stream, hands out sequence numbers and
//! performs the blocking request/reply exchange for every [`Lock`] it mints.
//!
//! # Protocol faults
//!
//! A failed connect, write or read, or a reply whose sequence or action does
//! not match the request, means the byte stream can no longer be trusted.
//! The locker then drops the connection (the next request reconnects) and
//! invalidates every registered handle that has not completed acquisition.
//! Handles that already hold their lock are left alone; they find out at
//! release time.
//!
//! # Concurrency
//!
//! The exchange is strictly one request at a time. `Locker` uses interior
//! mutability without synchronization and is therefore not `Sync`.

mod connection;


pub use connection::{Connector, TcpConnector};

use crate::config::Config;
use crate::error::{LockerError, Result};
use crate::lock::{Lock, LockService, LockState};
use crate::protocol::{REPLY_SIZE, Reply, Request};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::num::NonZeroU32;
use std::rc::Rc;
use tracing::{debug, warn};

/// Client connection to a lock server.
pub struct Locker<C: Connector = TcpConnector> {
    connector: C,
    connection: RefCell<Option<C::Stream>>,
    sequence: Cell<u32>,
    locks: RefCell<HashMap<u32, Rc<LockState>>>,
}

impl Locker<TcpConnector> {
    /// Locker for the server at `host:port`. No connection is made yet.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::with_connector(TcpConnector::new(host, port))
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_connector(TcpConnector::from_config(config))
    }
}

impl<C: Connector> Locker<C> {
    pub fn with_connector(connector: C) -> Self {
        Self {
            connector,
            connection: RefCell::new(None),
            sequence: Cell::new(0),
            locks: RefCell::new(HashMap::new()),
        }
    }

    /// Create and register a lock handle for `name`.
    pub fn create_lock(&self, name: impl Into<String>) -> Lock<'_> {
        let sequence = self.next_sequence();
        let state = Rc::new(LockState::new(sequence));
        self.locks
            .borrow_mut()
            .insert(sequence.get(), Rc::clone(&state));

        Lock::new(self, name.into(), state)
    }

    /// Acquire `name`, run `f` while holding it, then release.
    ///
    /// The lock is released without loss reporting. If `f` returns early or
    /// panics, the handle is still released when it goes out of scope.
    pub fn with_lock<T>(
        &self,
        name: impl Into<String>,
        wait_ms: u32,
        timeout_ms: u32,
        f: impl FnOnce(&Lock<'_>) -> T,
    ) -> Result<T> {
        let mut lock = self.create_lock(name);
        lock.acquire(wait_ms, timeout_ms)?;
        let value = f(&lock);
        lock.release(false)?;
        Ok(value)
    }

    /// Whether a connection is currently open.
    pub fn is_connected(&self) -> bool {
        self.connection.borrow().is_some()
    }

    /// Number of handles currently registered.
    pub fn registered(&self) -> usize {
        self.locks.borrow().len()
    }

    pub fn is_registered(&self, sequence: u32) -> bool {
        self.locks.borrow().contains_key(&sequence)
    }

    /// Last sequence number handed out, 0 before the first handle.
    pub fn last_sequence(&self) -> u32 {
        self.sequence.get()
    }

    fn next_sequence(&self) -> NonZeroU32 {
        let locks = self.locks.borrow();
        let mut current = self.sequence.get();
        // 0 marks an invalid handle; after wrap-around, sequences still held
        // by live handles are skipped too.
        let next = loop {
            current = current.wrapping_add(1);
            if let Some(next) = NonZeroU32::new(current)
                && !locks.contains_key(&next.get())
            {
                break next;
            }
        };
        self.sequence.set(next.get());
        next
    }

    /// Drop the connection and invalidate every unacquired handle.
    fn reset(&self) {
        self.connection.borrow_mut().take();

        self.locks.borrow_mut().retain(|_, state| {
            if state.is_acquired() {
                return true;
            }
            state.invalidate();
            false
        });
    }

    fn request(&self, request: &Request<'_>) -> Result<bool> {
        // Encoding errors are caught before the stream is touched.
        let frame = request.encode()?;

        match self.exchange(&frame).and_then(|reply| reply.verify(request)) {
            Ok(result) => {
                debug!(
                    sequence = request.sequence,
                    action = %request.action,
                    result,
                    "locker reply"
                );
                Ok(result)
            }
            Err(e) => {
                warn!(
                    sequence = request.sequence,
                    action = %request.action,
                    error = %e,
                    "locker protocol fault, resetting connection"
                );
                self.reset();
                Err(e)
            }
        }
    }

    fn exchange(&self, frame: &[u8]) -> Result<Reply> {
        let mut connection = self.connection.borrow_mut();
        let stream = match connection.take() {
            Some(stream) => stream,
            None => self.connect()?,
        };
        let stream = connection.insert(stream);

        stream.write_all(frame).map_err(LockerError::Write)?;
        stream.flush().map_err(LockerError::Write)?;

        let mut buf = [0u8; REPLY_SIZE];
        stream.read_exact(&mut buf).map_err(LockerError::Read)?;

        Ok(Reply::decode(&buf))
    }

    fn connect(&self) -> Result<C::Stream> {
        let addr = self.connector.describe();
        debug!(addr = %addr, "opening locker connection");
        self.connector
            .connect()
            .map_err(|source: io::Error| LockerError::Connect { addr, source })
    }
}

impl<C: Connector> LockService for Locker<C> {
    fn lock(&self, name: &str, sequence: u32, wait_ms: u32, timeout_ms: u32) -> Result<bool> {
        self.request(&Request::lock(name, sequence, wait_ms, timeout_ms))
    }

    fn unlock(&self, sequence: u32) -> Result<bool> {
        self.request(&Request::unlock(sequence))
    }

    fn unregister(&self, sequence: u32) {
        self.locks.borrow_mut().remove(&sequence);
    }
}

impl<C: Connector> std::fmt::Debug for Locker<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Locker")
            .field("endpoint", &self.connector.describe())
            .field("connected", &self.is_connected())
            .field("sequence", &self.sequence.get())
            .field("registered", &self.registered())
            .finish()
    }
}
