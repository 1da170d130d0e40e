//! Tracing setup for the locker binary.
//!
//! Events go to stderr. The filter comes from `LOCKER_LOG` using the usual
//! `EnvFilter` directives; without it, `warn` is used (`debug` with `-v`).

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "LOCKER_LOG";

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "debug" } else { "warn" };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
