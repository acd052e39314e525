//! Backup restore collaborator
//!
//! The transfer itself is delegated to the platform CLI; this module only
//! hands it the request the guard approved.

use crate::config::Config;
use crate::error::{ParityError, Result};
use crate::remote::remote_command;
use crate::restore::TransferRequest;
use crate::runner::{CommandLine, ProcessRunner};
use tracing::{error, info};
use url::Url;

/// A restore ready to run
pub trait Backup {
    /// Perform the restore. Failures are reported by the implementation.
    fn restore(&self);
}

/// Constructs the [`Backup`] for an authorized request
pub trait BackupFactory {
    /// Build the collaborator for `request`
    fn build<'s>(&'s self, request: TransferRequest) -> Box<dyn Backup + 's>;
}

/// Factory producing [`PlatformBackup`]s
pub struct PlatformBackups<'a> {
    runner: &'a dyn ProcessRunner,
    config: &'a Config,
}

impl<'a> PlatformBackups<'a> {
    /// Create a factory issuing commands through `runner`
    #[must_use]
    pub fn new(runner: &'a dyn ProcessRunner, config: &'a Config) -> Self {
        Self { runner, config }
    }
}

impl BackupFactory for PlatformBackups<'_> {
    fn build<'s>(&'s self, request: TransferRequest) -> Box<dyn Backup + 's> {
        Box::new(PlatformBackup {
            runner: self.runner,
            config: self.config,
            request,
        })
    }
}

/// Restores the latest backup of one environment into another via the platform CLI
pub struct PlatformBackup<'a> {
    runner: &'a dyn ProcessRunner,
    config: &'a Config,
    request: TransferRequest,
}

impl PlatformBackup<'_> {
    fn restore_to_development(&self) -> Result<bool> {
        let database = self
            .config
            .development
            .database
            .as_deref()
            .ok_or(ParityError::MissingDevelopmentDatabase)?;

        let steps = [
            CommandLine::new("dropdb").args(["--if-exists", database]),
            remote_command(
                self.config,
                &self.request.from,
                ["pg:pull", "DATABASE_URL", database],
            ),
        ];
        Ok(self.runner.spawn_chain(&steps))
    }

    fn restore_to_remote(&self) -> Result<bool> {
        let url_command = remote_command(self.config, &self.request.from, ["pg:backups:url"]);
        let output = self.runner.capture(&url_command)?;
        if !output.success {
            error!(
                "Could not fetch the latest backup URL for {}: {}",
                self.request.from,
                output.stderr.trim()
            );
            return Ok(false);
        }

        let url = output.stdout.trim();
        Url::parse(url).map_err(|e| ParityError::InvalidConnectionString {
            value: url.to_string(),
            reason: e.to_string(),
        })?;

        let restore = CommandLine::new(self.config.platform.cli.as_str())
            .args(["pg:backups:restore", url, "DATABASE"])
            .arg("--remote")
            .arg(self.request.to.as_str())
            .args(self.request.additional_args.split_whitespace());
        Ok(self.runner.spawn(&restore))
    }
}

impl Backup for PlatformBackup<'_> {
    fn restore(&self) {
        info!(
            "Restoring backup from {} into {}",
            self.request.from, self.request.to
        );

        let outcome = if self.request.to.is_development() {
            self.restore_to_development()
        } else {
            self.restore_to_remote()
        };

        match outcome {
            Ok(true) => info!("Restore into {} finished", self.request.to),
            Ok(false) => error!("Restore into {} failed", self.request.to),
            Err(e) => error!("Restore into {} failed: {}", self.request.to, e),
        }
    }
}
