//! Pending schema migration detection

use crate::config::Config;
use crate::environment::Environment;
use crate::runner::{CommandLine, ProcessRunner};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filesystem facts about the project being deployed
pub trait ProjectShape {
    /// Whether the build/task manifest exists
    fn has_manifest(&self) -> bool;

    /// Whether the migrations directory exists
    fn has_migrations_dir(&self) -> bool;
}

/// [`ProjectShape`] backed by existence checks under a project root
#[derive(Debug, Clone)]
pub struct FsProjectShape {
    manifest: PathBuf,
    migrations_dir: PathBuf,
}

impl FsProjectShape {
    /// Check the configured manifest and migrations directory under `root`
    pub fn new<P: AsRef<Path>>(root: P, config: &Config) -> Self {
        let root = root.as_ref();
        Self {
            manifest: root.join(&config.app.manifest),
            migrations_dir: root.join(&config.app.migrations_dir),
        }
    }
}

impl ProjectShape for FsProjectShape {
    fn has_manifest(&self) -> bool {
        self.manifest.exists()
    }

    fn has_migrations_dir(&self) -> bool {
        self.migrations_dir.is_dir()
    }
}

/// Decides whether a deploy needs to run migrations
pub struct MigrationChecker<'a> {
    runner: &'a dyn ProcessRunner,
    shape: &'a dyn ProjectShape,
    migrations_dir: &'a str,
}

impl<'a> MigrationChecker<'a> {
    /// Create a checker
    #[must_use]
    pub fn new(runner: &'a dyn ProcessRunner, shape: &'a dyn ProjectShape, config: &'a Config) -> Self {
        Self {
            runner,
            shape,
            migrations_dir: &config.app.migrations_dir,
        }
    }

    /// Both the manifest and the migrations directory are present
    #[must_use]
    pub fn looks_like_migratable_app(&self) -> bool {
        let migratable = self.shape.has_manifest() && self.shape.has_migrations_dir();
        debug!("Project looks migratable: {}", migratable);
        migratable
    }

    /// Whether `{environment}/master..{compare_ref}` touches the migrations directory.
    ///
    /// Any failure of the fetch-then-diff chain counts as pending, so a failed
    /// fetch is indistinguishable from a real difference.
    #[must_use]
    pub fn has_pending_migrations(&self, environment: &Environment, compare_ref: &str) -> bool {
        let steps = [
            CommandLine::new("git").args(["fetch", environment.as_str()]),
            CommandLine::new("git")
                .args(["diff", "--quiet"])
                .arg(format!("{environment}/master..{compare_ref}"))
                .args(["--", self.migrations_dir]),
        ];

        let pending = !self.runner.spawn_chain(&steps);
        debug!(
            "Pending migrations for {} against {}: {}",
            environment, compare_ref, pending
        );
        pending
    }
}
