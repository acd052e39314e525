//! Safety checks in front of backup restores

use crate::environment::Environment;
use crate::error::{ParityError, Result};
use crate::remote::RemoteResolver;
use tracing::{debug, info};

/// Flag that overrides the production restore block
pub const FORCE_FLAG: &str = "--force";

/// A restore that passed the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Environment whose latest backup is restored
    pub from: Environment,
    /// Environment receiving the backup
    pub to: Environment,
    /// Empty, a `--confirm <app>` token or the force flag
    pub additional_args: String,
}

/// Refuses unforced production restores and computes the confirmation token
pub struct RestoreGuard<'a> {
    resolver: &'a RemoteResolver<'a>,
}

impl<'a> RestoreGuard<'a> {
    /// Create a guard that resolves confirmation names through `resolver`
    #[must_use]
    pub fn new(resolver: &'a RemoteResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Check a restore from `from` into `to`.
    ///
    /// Runs before anything is spawned; a blocked restore never reaches the
    /// backup collaborator.
    pub fn authorize(
        &self,
        from: &Environment,
        to: &Environment,
        force: bool,
    ) -> Result<TransferRequest> {
        if to.is_production() && !force {
            debug!("Refusing unforced restore from {} into production", from);
            return Err(ParityError::ProductionRestoreBlocked);
        }

        let additional_args = if to.is_development() {
            String::new()
        } else if to.is_production() {
            FORCE_FLAG.to_string()
        } else {
            format!("--confirm {}", self.resolver.resolve(to)?)
        };

        info!("Authorized restore {} -> {}", from, to);
        Ok(TransferRequest {
            from: from.clone(),
            to: to.clone(),
            additional_args,
        })
    }
}
