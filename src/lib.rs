//! Client for a remote lock server.
//!
//! A [`Locker`] holds one stream connection to the server and mints
//! single-use [`Lock`] handles, each bound to its own sequence number:
//!
//! ```no_run
//! use locker::Locker;
//!
//! let locker = Locker::new("127.0.0.1", locker::protocol::DEFAULT_PORT);
//! let mut lock = locker.create_lock("example");
//! lock.acquire(200, 10_000)?;
//! // ... critical section ...
//! lock.release(false)?;
//! # Ok::<(), locker::LockerError>(())
//! ```
//!
//! Requests are blocking and strictly sequential on the connection. A broken
//! or desynchronized connection is dropped and every handle that had not
//! acquired its lock yet is invalidated.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod lock;
pub mod locker;
pub mod logging;
pub mod protocol;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use error::{LockerError, Result};
pub use lock::{Lock, LockService};
pub use locker::{Connector, Locker, TcpConnector};
