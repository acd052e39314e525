use thiserror::Error;

/// Custom error types for `Parity`
#[derive(Error, Debug)]
pub enum ParityError {
    /// A restore into production was requested without `--force`
    #[error(
        "Parity does not support restoring backups into your production environment. \
         Use `--force` to override."
    )]
    ProductionRestoreBlocked,

    /// The remote application name could not be determined
    #[error("Could not resolve the remote application for '{environment}': {reason}")]
    RemoteResolution {
        /// Environment whose remote was queried
        environment: String,
        /// Why the remote metadata was rejected
        reason: String,
    },

    /// `restore` was invoked without naming the environment to restore from
    #[error("restore requires a source environment, e.g. `restore production`")]
    MissingRestoreSource,

    /// A connection string fetched from the remote could not be used
    #[error("Invalid connection string '{value}': {reason}")]
    InvalidConnectionString {
        /// The raw value returned by the remote
        value: String,
        /// Error message details
        reason: String,
    },

    /// Restoring into development needs a local database name
    #[error("No development database configured. Set `database` under [development] in parity.toml")]
    MissingDevelopmentDatabase,

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for `Parity` operations
pub type Result<T> = std::result::Result<T, ParityError>;
