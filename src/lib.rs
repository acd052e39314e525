//! `Parity` - environment-aware commands for git-deployed applications
//!
//! Translates `deploy`, `backup`, `restore`, `console`, `tail`, `redis_cli`
//! and arbitrary passthrough commands into invocations of the platform CLI
//! and git.

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    missing_docs,
    rust_2018_idioms
)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

/// Backup restore collaborator
pub mod backup;
/// Command line front end shared by the binaries
pub mod cli;
/// Workflow handlers
pub mod commands;
/// Configuration management for Parity
pub mod config;
pub mod connection;
pub mod dispatch;
pub mod environment;
/// Error types
pub mod error;
pub mod migrations;
pub mod remote;
pub mod restore;
pub mod runner;

pub use config::Config;
pub use dispatch::{CommandDispatcher, Subcommand};
pub use environment::Environment;
pub use error::{ParityError, Result};
pub use runner::{CapturedOutput, CommandLine, ProcessRunner, SystemRunner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
