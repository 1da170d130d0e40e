//! `locker hold`: acquire, sleep, release.

use super::LockRequest;
use crate::config::Config;
use crate::error::Result;
use crate::locker::{Connector, Locker};
use std::thread;
use std::time::Duration;
use tracing::info;

pub(super) fn cmd_hold(config: &Config, request: LockRequest, hold_ms: u64) -> Result<()> {
    let locker = Locker::from_config(config);
    hold(&locker, &request, Duration::from_millis(hold_ms))?;
    println!("Released lock '{}'", request.name);
    Ok(())
}

fn hold<C: Connector>(locker: &Locker<C>, request: &LockRequest, duration: Duration) -> Result<()> {
    let mut lock = locker.create_lock(request.name.as_str());
    lock.acquire(request.wait_ms, request.timeout_ms)?;
    info!(lock = %request.name, hold_ms = duration.as_millis() as u64, "lock acquired");

    thread::sleep(duration);

    lock.release(request.panic_on_loss)
}
