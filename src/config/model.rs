//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for the locker client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Endpoint
    // =========================================================================
    /// Lock server host name or address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Lock server TCP port.
    #[serde(default = "default_port")]
    pub port: u16,

    // =========================================================================
    // Lock defaults
    // =========================================================================
    /// How long the server may keep a lock request pending, in milliseconds.
    #[serde(default = "default_wait_ms")]
    pub wait_ms: u32,

    /// How long the server honors a granted lock, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u32,

    /// Report a release the server did not confirm as an error.
    #[serde(default)]
    pub panic_on_loss: bool,

    // =========================================================================
    // Transport
    // =========================================================================
    /// Limit on establishing the TCP connection (none by default).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u64>,

    /// Limit on each blocking read of a reply (none by default).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            wait_ms: default_wait_ms(),
            timeout_ms: default_timeout_ms(),
            panic_on_loss: false,
            connect_timeout_ms: None,
            read_timeout_ms: None,
        }
    }
}
