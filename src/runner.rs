//! External process execution
//!
//! Every remote or version-control operation goes through [`ProcessRunner`],
//! so workflows only ever build [`CommandLine`] token lists and never touch
//! `std::process` themselves.

use crate::error::Result;
use std::fmt;
use std::process::{Command, Stdio};
use tracing::{debug, error};

/// One external invocation: a program followed by its arguments, kept as
/// separate tokens and never re-quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Start a command line for `program`
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments in order
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The executable
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the executable
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// All tokens, program first
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str))
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

// Display is for logs and assertions only; runners never parse it back.
impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().collect::<Vec<_>>().join(" "))
    }
}

/// Output of a command run in capture mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Whether the command exited successfully
    pub success: bool,
}

impl CapturedOutput {
    /// A successful capture with the given stdout
    #[must_use]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
        }
    }

    /// A failed capture with the given stderr
    #[must_use]
    pub fn failure(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
        }
    }
}

/// Capability to run external commands.
///
/// Implementations:
/// - `SystemRunner` - real processes via `std::process`
/// - test doubles that record the issued command lines
pub trait ProcessRunner {
    /// Replace the current process with `command`.
    ///
    /// Only returns when the replacement could not happen; the return value
    /// is then the outcome to report.
    fn replace(&self, command: &CommandLine) -> bool;

    /// Run `command` with inherited stdio and wait for it
    fn spawn(&self, command: &CommandLine) -> bool;

    /// Run `command` without touching the caller's stdio and collect its output
    fn capture(&self, command: &CommandLine) -> Result<CapturedOutput>;

    /// Spawn `commands` in order, stopping at the first failure
    fn spawn_chain(&self, commands: &[CommandLine]) -> bool {
        commands.iter().all(|command| self.spawn(command))
    }
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    #[cfg(unix)]
    fn replace(&self, command: &CommandLine) -> bool {
        use std::os::unix::process::CommandExt;

        debug!("exec: {}", command);
        let err = command.to_command().exec();
        error!("Failed to exec `{}`: {}", command, err);
        false
    }

    #[cfg(not(unix))]
    fn replace(&self, command: &CommandLine) -> bool {
        // No exec here: hand over the terminal to a child and mirror its exit code.
        debug!("exec (emulated): {}", command);
        match command.to_command().status() {
            Ok(status) => std::process::exit(status.code().unwrap_or(1)),
            Err(err) => {
                error!("Failed to run `{}`: {}", command, err);
                false
            }
        }
    }

    fn spawn(&self, command: &CommandLine) -> bool {
        debug!("spawn: {}", command);
        match command.to_command().status() {
            Ok(status) => {
                if !status.success() {
                    debug!("`{}` exited with {:?}", command, status.code());
                }
                status.success()
            }
            Err(err) => {
                error!("Failed to run `{}`: {}", command, err);
                false
            }
        }
    }

    fn capture(&self, command: &CommandLine) -> Result<CapturedOutput> {
        debug!("capture: {}", command);
        let output = command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CapturedOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }
}
