//! CLI argument parsing for locker.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Locker: take a named lock on a remote lock server.
///
/// The lock is requested with a wait window (how long the server may keep the
/// request pending) and a timeout (how long the server honors the granted
/// lock).
#[derive(Parser, Debug)]
#[command(name = "locker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// YAML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Lock server host (overrides config).
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Lock server port (overrides config).
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Log protocol traffic at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for locker.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Acquire a lock, hold it for a while, then release it.
    Hold(HoldArgs),

    /// Run a command while holding a lock.
    ///
    /// The lock is released when the command exits, whatever its status.
    Run(RunArgs),
}

/// Lock request options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct LockArgs {
    /// Name of the lock.
    pub name: String,

    /// Milliseconds the server may wait before refusing (overrides config).
    #[arg(short, long)]
    pub wait: Option<u32>,

    /// Milliseconds the server honors the granted lock (overrides config).
    #[arg(short, long)]
    pub timeout: Option<u32>,

    /// Fail if the server did not confirm the release.
    #[arg(long)]
    pub panic_on_loss: bool,
}

/// Arguments for the `hold` command.
#[derive(Args, Debug)]
pub struct HoldArgs {
    #[command(flatten)]
    pub lock: LockArgs,

    /// Milliseconds to hold the lock before releasing it.
    #[arg(long, default_value_t = 5000)]
    pub hold_ms: u64,
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub lock: LockArgs,

    /// Command and arguments to run.
    #[arg(last = true, required = true)]
    pub command: Vec<String>,
}
