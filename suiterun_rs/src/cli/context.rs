//! Startup state shared by the argv pre-scan and command registration.

use crate::config::{ConfigLoader, ConfigSource};
use crate::error::LaunchError;

use super::command::CommandTable;
use super::preprocess::{ArgvPreprocessor, ParsedArguments};
use super::registry::CommandRegistry;

/// Owns the raw argv, the configuration source and the memoized pre-scan.
///
/// The pre-scan always runs before the default configuration is requested,
/// so an explicit `--config` path is what the registry sees.
#[derive(Debug)]
pub struct StartupContext<S = ConfigLoader> {
    raw_argv: Vec<String>,
    source: S,
    preprocessor: ArgvPreprocessor,
}

impl<S: ConfigSource> StartupContext<S> {
    pub fn new(raw_argv: Vec<String>, source: S) -> Self {
        Self {
            raw_argv,
            source,
            preprocessor: ArgvPreprocessor::new(),
        }
    }

    /// Pre-scan result, computed on first use.
    pub fn core_arguments(&mut self) -> Result<&ParsedArguments, LaunchError> {
        self.preprocessor.process(&self.raw_argv, &mut self.source)
    }

    /// Pre-scan (which may select an explicit config), then register the
    /// custom commands the configuration declares.
    pub fn register_custom_commands(
        &mut self,
        registry: &CommandRegistry,
        table: &mut CommandTable,
    ) -> Result<usize, LaunchError> {
        self.core_arguments()?;
        registry.register_custom_commands(&mut self.source, table)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
