//! Deployment environment names
//!
//! Any name is a valid environment. `production` and `development` get
//! special treatment in restores and deploys.

use std::fmt;

/// Name of the production environment
pub const PRODUCTION: &str = "production";
/// Name of the staging environment
pub const STAGING: &str = "staging";
/// Name of the local development environment
pub const DEVELOPMENT: &str = "development";

/// A deployment target, identified by its remote name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Environment(String);

impl Environment {
    /// Create an environment from its name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The environment name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the production environment
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.0 == PRODUCTION
    }

    /// Whether this is the local development environment
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.0 == DEVELOPMENT
    }

    /// Ref compared against `{env}/master` when looking for pending migrations.
    ///
    /// Production deploys ship `master`; every other environment receives the
    /// current checkout, so the working `HEAD` is compared instead.
    #[must_use]
    pub fn migration_compare_ref(&self) -> &'static str {
        if self.is_production() {
            "master"
        } else {
            "HEAD"
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Environment {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
