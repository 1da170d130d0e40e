//! Default values for the Config struct.

use crate::protocol::DEFAULT_PORT;

// Default value functions for serde
pub(crate) fn default_host() -> String {
    "127.0.0.1".to_string()
}
pub(crate) fn default_port() -> u16 {
    DEFAULT_PORT
}
pub(crate) fn default_wait_ms() -> u32 {
    200
}
pub(crate) fn default_timeout_ms() -> u32 {
    10_000
}
