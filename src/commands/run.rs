//! `locker run`: run a command while holding a lock.

use super::LockRequest;
use crate::config::Config;
use crate::error::{LockerError, Result};
use crate::locker::{Connector, Locker};
use std::process::{Command, ExitStatus};
use tracing::debug;

pub(super) fn cmd_run(config: &Config, request: LockRequest, command: Vec<String>) -> Result<()> {
    let locker = Locker::from_config(config);
    run(&locker, &request, &command)
}

fn run<C: Connector>(locker: &Locker<C>, request: &LockRequest, command: &[String]) -> Result<()> {
    let Some((program, args)) = command.split_first() else {
        return Err(LockerError::Config("no command given".to_string()));
    };

    let mut lock = locker.create_lock(request.name.as_str());
    lock.acquire(request.wait_ms, request.timeout_ms)?;
    debug!(lock = %request.name, program = %program, "running command under lock");

    let status = Command::new(program).args(args).status();

    // Released whatever the command's outcome.
    lock.release(request.panic_on_loss)?;

    check_status(&command.join(" "), status)
}

fn check_status(command: &str, status: std::io::Result<ExitStatus>) -> Result<()> {
    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(LockerError::CommandFailed {
            command: command.to_string(),
            code: status.code(),
        }),
        Err(source) => Err(LockerError::Spawn {
            command: command.to_string(),
            source,
        }),
    }
}
