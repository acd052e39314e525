//! Remote application lookup

use crate::config::Config;
use crate::environment::Environment;
use crate::error::{ParityError, Result};
use crate::runner::{CommandLine, ProcessRunner};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Build `{cli} <words...> --remote {environment}`
pub fn remote_command<I, S>(config: &Config, environment: &Environment, words: I) -> CommandLine
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CommandLine::new(config.platform.cli.as_str())
        .args(words)
        .arg("--remote")
        .arg(environment.as_str())
}

/// Resolves the platform's application name behind an environment's git remote
pub struct RemoteResolver<'a> {
    runner: &'a dyn ProcessRunner,
    config: &'a Config,
}

impl<'a> RemoteResolver<'a> {
    /// Create a resolver issuing commands through `runner`
    #[must_use]
    pub fn new(runner: &'a dyn ProcessRunner, config: &'a Config) -> Self {
        Self { runner, config }
    }

    /// Look up the application name for `environment`.
    ///
    /// Fails instead of guessing: the name ends up in a `--confirm` token for
    /// a destructive transfer.
    pub fn resolve(&self, environment: &Environment) -> Result<String> {
        let command = remote_command(self.config, environment, ["info"]);
        let output = self.runner.capture(&command)?;

        if !output.success {
            return Err(ParityError::RemoteResolution {
                environment: environment.to_string(),
                reason: format!("`{command}` failed: {}", output.stderr.trim()),
            });
        }

        let name = parse_app_name(&output.stdout).ok_or_else(|| ParityError::RemoteResolution {
            environment: environment.to_string(),
            reason: "no `=== <app>` header in remote info".to_string(),
        })?;

        debug!("Resolved remote '{}' to app '{}'", environment, name);
        Ok(name)
    }
}

/// Extract the app name from the `=== <app>` header on the first line
fn parse_app_name(info: &str) -> Option<String> {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    let header = HEADER.get_or_init(|| Regex::new(r"^===\s*(\S+)").expect("valid header pattern"));
    let first_line = info.lines().next()?;

    header
        .captures(first_line.trim())
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
}
