//! Git push deploys with migrations

use crate::config::Config;
use crate::environment::Environment;
use crate::migrations::{MigrationChecker, ProjectShape};
use crate::remote::remote_command;
use crate::runner::{CommandLine, ProcessRunner};
use tracing::{debug, error, info};

/// How a deploy ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeployOutcome {
    PushFailed,
    PushedNoMigrationNeeded,
    PushedAndMigrated { migrated: bool },
}

impl DeployOutcome {
    const fn succeeded(self) -> bool {
        match self {
            Self::PushFailed => false,
            Self::PushedNoMigrationNeeded => true,
            Self::PushedAndMigrated { migrated } => migrated,
        }
    }
}

/// Push, then migrate and restart when the push shipped new migrations
pub struct DeployWorkflow<'a> {
    runner: &'a dyn ProcessRunner,
    checker: MigrationChecker<'a>,
    config: &'a Config,
}

impl<'a> DeployWorkflow<'a> {
    /// Create a workflow
    #[must_use]
    pub fn new(runner: &'a dyn ProcessRunner, shape: &'a dyn ProjectShape, config: &'a Config) -> Self {
        Self {
            runner,
            checker: MigrationChecker::new(runner, shape, config),
            config,
        }
    }

    /// Deploy to `environment`.
    ///
    /// Pending migrations are detected before pushing: once pushed, the
    /// remote branch matches the local one and the diff is empty.
    pub fn run(&self, environment: &Environment) -> bool {
        info!("Deploying to {}", environment);

        let needs_migration = self.checker.looks_like_migratable_app()
            && self
                .checker
                .has_pending_migrations(environment, environment.migration_compare_ref());
        debug!("Migration needed after push: {}", needs_migration);

        let outcome = if !self.runner.spawn(&push_command(environment)) {
            error!("Push to {} failed", environment);
            DeployOutcome::PushFailed
        } else if needs_migration {
            DeployOutcome::PushedAndMigrated {
                migrated: self.migrate(environment),
            }
        } else {
            DeployOutcome::PushedNoMigrationNeeded
        };

        info!("Deploy to {} finished: {:?}", environment, outcome);
        outcome.succeeded()
    }

    fn migrate(&self, environment: &Environment) -> bool {
        info!("Running migrations on {}", environment);
        let steps = [
            remote_command(
                self.config,
                environment,
                std::iter::once("run").chain(self.config.app.migrate_task.split_whitespace()),
            ),
            remote_command(self.config, environment, ["restart"]),
        ];

        let migrated = self.runner.spawn_chain(&steps);
        if !migrated {
            error!("Migrating {} failed", environment);
        }
        migrated
    }
}

/// Production ships `master`; any other environment gets the current commit
/// force-pushed onto its `master`.
fn push_command(environment: &Environment) -> CommandLine {
    if environment.is_production() {
        CommandLine::new("git").args(["push", environment.as_str(), "master"])
    } else {
        CommandLine::new("git").args(["push", environment.as_str(), "HEAD:master", "--force"])
    }
}
