//! Exit code constants for the locker CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config, handle misuse)
//! - 2: The command run under the lock failed
//! - 3: Protocol failure (connection lost or reply desynchronized)
//! - 4: Lock not granted within the wait window
//! - 5: Lock was lost before it was released

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or handle misuse.
pub const USER_ERROR: i32 = 1;

/// The wrapped command exited unsuccessfully.
pub const COMMAND_FAILURE: i32 = 2;

/// Transport or framing failure talking to the lock server.
pub const PROTOCOL_FAILURE: i32 = 3;

/// The server refused the lock within the wait window.
pub const LOCK_FAILURE: i32 = 4;

/// The server did not confirm the release: the lock had already been lost.
pub const LOST_LOCK: i32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            COMMAND_FAILURE,
            PROTOCOL_FAILURE,
            LOCK_FAILURE,
            LOST_LOCK,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
