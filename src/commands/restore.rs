//! Guarded backup restores

use crate::backup::BackupFactory;
use crate::config::Config;
use crate::environment::Environment;
use crate::error::{ParityError, Result};
use crate::remote::RemoteResolver;
use crate::restore::RestoreGuard;
use crate::runner::ProcessRunner;

/// Restore the latest backup of `from` into `to`.
///
/// The backup collaborator is only built once the guard approved the request
/// and, for development, a local database is configured.
pub fn handle_restore(
    runner: &dyn ProcessRunner,
    backups: &dyn BackupFactory,
    config: &Config,
    from: &Environment,
    to: &Environment,
    force: bool,
) -> Result<bool> {
    let resolver = RemoteResolver::new(runner, config);
    let request = RestoreGuard::new(&resolver).authorize(from, to, force)?;
    if to.is_development() && config.development.database.is_none() {
        return Err(ParityError::MissingDevelopmentDatabase);
    }

    backups.build(request).restore();
    Ok(true)
}
