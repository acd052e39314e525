//! Maps an environment and its argument list onto a workflow

use crate::backup::BackupFactory;
use crate::commands::{deploy::DeployWorkflow, restore, shell};
use crate::config::Config;
use crate::environment::Environment;
use crate::error::{ParityError, Result};
use crate::migrations::ProjectShape;
use crate::restore::FORCE_FLAG;
use crate::runner::ProcessRunner;
use tracing::debug;

/// The fixed command set; everything else passes through to the platform CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subcommand {
    /// `backup`
    Backup,
    /// `restore <source>` / `restore-from <source>`, optionally `--force`
    Restore {
        /// Environment whose backup is restored
        from: Environment,
        /// Whether `--force` was given
        force: bool,
    },
    /// `console`
    Console,
    /// `tail [args...]`
    Tail(Vec<String>),
    /// `redis_cli`
    CacheShell,
    /// `deploy`
    Deploy,
    /// Any other command, forwarded verbatim
    Passthrough(Vec<String>),
}

impl Subcommand {
    /// Classify an argument list by its first token
    pub fn parse(args: &[String]) -> Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Self::Passthrough(Vec::new()));
        };

        let subcommand = match name.as_str() {
            "backup" => Self::Backup,
            "restore" | "restore-from" => Self::Restore {
                from: rest
                    .iter()
                    .find(|arg| arg.as_str() != FORCE_FLAG)
                    .map(|from| Environment::new(from.as_str()))
                    .ok_or(ParityError::MissingRestoreSource)?,
                force: rest.iter().any(|arg| arg == FORCE_FLAG),
            },
            "console" => Self::Console,
            "tail" => Self::Tail(rest.to_vec()),
            "redis_cli" => Self::CacheShell,
            "deploy" => Self::Deploy,
            _ => Self::Passthrough(args.to_vec()),
        };
        Ok(subcommand)
    }
}

/// Entry point shared by every binary
pub struct CommandDispatcher<'a> {
    runner: &'a dyn ProcessRunner,
    shape: &'a dyn ProjectShape,
    backups: &'a dyn BackupFactory,
    config: &'a Config,
}

impl<'a> CommandDispatcher<'a> {
    /// Create a dispatcher over the given collaborators
    #[must_use]
    pub fn new(
        runner: &'a dyn ProcessRunner,
        shape: &'a dyn ProjectShape,
        backups: &'a dyn BackupFactory,
        config: &'a Config,
    ) -> Self {
        Self {
            runner,
            shape,
            backups,
            config,
        }
    }

    /// Run `args` against `environment` and report overall success.
    ///
    /// A blocked production restore prints its message to stdout; any other
    /// error goes to stderr. Both yield `false`.
    pub fn run(&self, environment: &Environment, args: &[String]) -> bool {
        match self.try_run(environment, args) {
            Ok(succeeded) => succeeded,
            Err(blocked @ ParityError::ProductionRestoreBlocked) => {
                println!("{blocked}");
                false
            }
            Err(e) => {
                debug!("{} {:?} failed: {}", environment, args, e);
                eprintln!("Error: {e}");
                false
            }
        }
    }

    fn try_run(&self, environment: &Environment, args: &[String]) -> Result<bool> {
        let subcommand = Subcommand::parse(args)?;
        debug!("{}: {:?}", environment, subcommand);

        match subcommand {
            Subcommand::Backup => Ok(shell::handle_backup(self.runner, self.config, environment)),
            Subcommand::Restore { from, force } => restore::handle_restore(
                self.runner,
                self.backups,
                self.config,
                &from,
                environment,
                force,
            ),
            Subcommand::Console => Ok(shell::handle_console(self.runner, self.config, environment)),
            Subcommand::Tail(rest) => Ok(shell::handle_tail(
                self.runner,
                self.config,
                environment,
                &rest,
            )),
            Subcommand::CacheShell => shell::handle_cache_shell(self.runner, self.config, environment),
            Subcommand::Deploy => {
                Ok(DeployWorkflow::new(self.runner, self.shape, self.config).run(environment))
            }
            Subcommand::Passthrough(tokens) => Ok(shell::handle_passthrough(
                self.runner,
                self.config,
                environment,
                &tokens,
            )),
        }
    }
}
