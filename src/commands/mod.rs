//! Command implementations for locker.
//!
//! Resolves the effective configuration (file, then command-line overrides)
//! and routes each CLI command to its handler.

mod hold;
mod run;

use crate::cli::{Cli, Command, LockArgs};
use crate::config::Config;
use crate::error::Result;

/// Lock request parameters after applying defaults from the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LockRequest {
    pub name: String,
    pub wait_ms: u32,
    pub timeout_ms: u32,
    pub panic_on_loss: bool,
}

impl LockRequest {
    pub(crate) fn resolve(args: LockArgs, config: &Config) -> Self {
        Self {
            name: args.name,
            wait_ms: args.wait.unwrap_or(config.wait_ms),
            timeout_ms: args.timeout.unwrap_or(config.timeout_ms),
            panic_on_loss: args.panic_on_loss || config.panic_on_loss,
        }
    }
}

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    match cli.command {
        Command::Hold(args) => {
            let request = LockRequest::resolve(args.lock, &config);
            hold::cmd_hold(&config, request, args.hold_ms)
        }
        Command::Run(args) => {
            let request = LockRequest::resolve(args.lock, &config);
            run::cmd_run(&config, request, args.command)
        }
    }
}

/// Load the config file, if any, and apply endpoint overrides.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    config.validate()?;
    Ok(config)
}
