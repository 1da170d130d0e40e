//! Error types for the locker client.
//!
//! Uses thiserror for derive macros. Variants fall into four classes that
//! callers treat differently: protocol faults (connection is gone, every
//! unacquired handle was reset), a clean refusal (`WaitTimeout`), a clean
//! loss reported on release (`LostLock`), and misuse of a handle.

use crate::exit_codes;
use std::io;
use thiserror::Error;

/// Main error type for locker operations.
#[derive(Error, Debug)]
pub enum LockerError {
    /// Could not open the stream connection to the lock server.
    #[error("failed to connect to locker at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Writing a request frame failed.
    #[error("writing to locker failed: {0}")]
    Write(#[source] io::Error),

    /// Reading the reply frame failed or the stream ended early.
    #[error("reading from locker failed: {0}")]
    Read(#[source] io::Error),

    /// The reply echoed a different sequence than the one requested.
    #[error("requested lock with sequence {expected}, received reply with {received}")]
    InvalidSequence { expected: u32, received: u32 },

    /// The reply echoed a different action than the one requested.
    #[error("requested action {expected}, received action {received}")]
    InvalidAction { expected: u8, received: u8 },

    /// The server did not grant the lock within the wait window.
    #[error("wait timeout exceeded for lock {0}")]
    WaitTimeout(String),

    /// The server did not confirm the release.
    #[error("lost lock {0}")]
    LostLock(String),

    /// Acquire was attempted on a handle that has already been invalidated.
    #[error("trying to reuse lock {0}")]
    LockReuse(String),

    /// Release was attempted on a handle that does not hold its lock.
    #[error("trying to unlock lock {0} without lock")]
    UnlockWithoutLock(String),

    /// The lock name does not fit into the one-byte length field.
    #[error("lock name is {len} bytes long, at most 255 bytes are allowed")]
    NameTooLong { len: usize },

    /// Invalid or unreadable configuration.
    #[error("{0}")]
    Config(String),

    /// The command to run while holding the lock could not be started.
    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The command run while holding the lock failed.
    #[error("command '{command}' failed with exit code {code:?}")]
    CommandFailed { command: String, code: Option<i32> },
}

impl LockerError {
    /// Whether the error came from a broken or desynchronized connection.
    ///
    /// When this is true the connection has been torn down and every handle
    /// that had not completed acquisition has been invalidated.
    pub fn is_protocol_fault(&self) -> bool {
        matches!(
            self,
            LockerError::Connect { .. }
                | LockerError::Write(_)
                | LockerError::Read(_)
                | LockerError::InvalidSequence { .. }
                | LockerError::InvalidAction { .. }
        )
    }

    /// Whether a fresh attempt with the same handle may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LockerError::WaitTimeout(_))
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LockerError::Connect { .. }
            | LockerError::Write(_)
            | LockerError::Read(_)
            | LockerError::InvalidSequence { .. }
            | LockerError::InvalidAction { .. } => exit_codes::PROTOCOL_FAILURE,
            LockerError::WaitTimeout(_) => exit_codes::LOCK_FAILURE,
            LockerError::LostLock(_) => exit_codes::LOST_LOCK,
            LockerError::LockReuse(_)
            | LockerError::UnlockWithoutLock(_)
            | LockerError::NameTooLong { .. }
            | LockerError::Config(_) => exit_codes::USER_ERROR,
            LockerError::Spawn { .. } | LockerError::CommandFailed { .. } => {
                exit_codes::COMMAND_FAILURE
            }
        }
    }
}

/// Result type alias for locker operations.
pub type Result<T> = std::result::Result<T, LockerError>;
