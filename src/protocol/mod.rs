//! Wire format spoken with the lock server.
//!
//! # Request frame
//!
//! | field    | size | encoding             |
//! |----------|------|----------------------|
//! | name_len | 1    | unsigned             |
//! | sequence | 4    | little-endian u32    |
//! | wait     | 4    | little-endian u32 ms |
//! | timeout  | 4    | little-endian u32 ms |
//! | action   | 1    | 1 = lock, 0 = unlock |
//! | name     | n    | raw bytes            |
//!
//! # Reply frame
//!
//! Always exactly [`REPLY_SIZE`] bytes: the echoed sequence (little-endian
//! u32), the echoed action byte and a result byte (non-zero means success).


use crate::error::{LockerError, Result};

/// Default TCP port of the lock server.
pub const DEFAULT_PORT: u16 = 4545;

/// Size of the fixed part of a request frame, before the name.
pub const HEADER_SIZE: usize = 14;

/// Size of a reply frame in bytes.
pub const REPLY_SIZE: usize = 6;

/// Longest name the one-byte length field can describe.
pub const MAX_NAME_LEN: usize = u8::MAX as usize;

/// Requested operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Action {
    Unlock = 0,
    Lock = 1,
}

impl Action {
    /// Wire code of the action.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Lock => f.write_str("lock"),
            Action::Unlock => f.write_str("unlock"),
        }
    }
}

/// A request frame before encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request<'a> {
    pub name: &'a str,
    pub sequence: u32,
    pub wait_ms: u32,
    pub timeout_ms: u32,
    pub action: Action,
}

impl<'a> Request<'a> {
    /// Lock request for `name`.
    pub fn lock(name: &'a str, sequence: u32, wait_ms: u32, timeout_ms: u32) -> Self {
        Self {
            name,
            sequence,
            wait_ms,
            timeout_ms,
            action: Action::Lock,
        }
    }

    /// Unlock request. The server identifies the lock by sequence alone.
    pub fn unlock(sequence: u32) -> Self {
        Self {
            name: "",
            sequence,
            wait_ms: 0,
            timeout_ms: 0,
            action: Action::Unlock,
        }
    }

    /// Encode the frame.
    ///
    /// Fails with [`LockerError::NameTooLong`] when the name does not fit the
    /// one-byte length field.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let name = self.name.as_bytes();
        let len = u8::try_from(name.len())
            .map_err(|_| LockerError::NameTooLong { len: name.len() })?;

        let mut buf = Vec::with_capacity(HEADER_SIZE + name.len());
        buf.push(len);
        buf.extend_from_slice(&self.sequence.to_le_bytes());
        buf.extend_from_slice(&self.wait_ms.to_le_bytes());
        buf.extend_from_slice(&self.timeout_ms.to_le_bytes());
        buf.push(self.action.code());
        buf.extend_from_slice(name);
        Ok(buf)
    }
}

/// A decoded reply frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    pub sequence: u32,
    /// Raw echoed action byte; kept raw so unknown codes still compare.
    pub action: u8,
    pub result: bool,
}

impl Reply {
    pub fn decode(buf: &[u8; REPLY_SIZE]) -> Self {
        Self {
            sequence: u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
            action: buf[4],
            result: buf[5] != 0,
        }
    }

    /// Check the reply belongs to `request` and return its result flag.
    ///
    /// Sequence is checked before action.
    pub fn verify(&self, request: &Request<'_>) -> Result<bool> {
        if self.sequence != request.sequence {
            return Err(LockerError::InvalidSequence {
                expected: request.sequence,
                received: self.sequence,
            });
        }

        if self.action != request.action.code() {
            return Err(LockerError::InvalidAction {
                expected: request.action.code(),
                received: self.action,
            });
        }

        Ok(self.result)
    }
}
