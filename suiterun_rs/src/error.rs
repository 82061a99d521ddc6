//! Startup error kinds for the launcher.
//!
//! Only [`LaunchError::NotFound`] raised by default discovery is recovered
//! locally; every other kind is rendered and ends the process with status 1.

use thiserror::Error;

/// Errors raised while preparing the launcher, before any command runs.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// No configuration source exists at the resolved location.
    #[error("Configuration file could not be found in {location}")]
    NotFound { location: String },

    /// An explicit `--config`/`-c` path did not resolve to a configuration.
    #[error("Your configuration file `{path}` could not be found.")]
    NotFoundExplicit { path: String },

    /// The configuration source exists but cannot be read or parsed.
    #[error("Configuration file {path} is invalid: {message}")]
    Parse { path: String, message: String },

    /// Invalid custom command declaration or unusable host environment.
    #[error("{0}")]
    Configuration(String),
}

impl LaunchError {
    /// True for the one kind the registry is allowed to swallow.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LaunchError::NotFound { .. })
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
