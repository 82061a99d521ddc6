//! Custom commands declared in configuration.
//!
//! ```toml
//! [extensions]
//! commands = ["my_suite::commands::Deploy"]
//! ```
//!
//! A type reference only becomes a command if it is registered in the
//! [`CommandRegistry`] catalog with the [`CustomCommand`] capability. Types
//! the launcher knows about without that capability (the loader, the registry
//! itself) are kept in the catalog so a misdeclared reference gets a precise
//! error. A reference to anything else is reported as not found.

use std::collections::HashMap;

use tracing::{debug, info};

use super::command::{Command, CommandTable};
use crate::config::ConfigSource;
use crate::error::LaunchError;

/// Capability required from a configured custom command.
pub trait CustomCommand: Command + Sized + 'static {
    /// Display name the command is registered under, e.g. `custom:run`.
    fn command_name() -> &'static str;

    /// Build the command with the name it is registered under.
    fn with_name(name: &str) -> Self;
}

type CommandFactory = fn(&str) -> Box<dyn Command>;

#[derive(Clone, Copy)]
enum CatalogEntry {
    Command {
        name: fn() -> &'static str,
        build: CommandFactory,
    },
    Opaque {
        rust_type: fn() -> &'static str,
    },
}

/// A validated declaration, consumed right after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CommandDescriptor {
    type_ref: String,
    display_name: String,
}

/// Descriptor plus the factory that builds it.
struct Resolved {
    descriptor: CommandDescriptor,
    build: CommandFactory,
}

impl Resolved {
    fn build(&self) -> Box<dyn Command> {
        (self.build)(&self.descriptor.display_name)
    }
}

/// Registry of factories keyed by type reference.
#[derive(Default, Clone)]
pub struct CommandRegistry {
    catalog: HashMap<String, CatalogEntry>,
}

fn build_command<T: CustomCommand>(name: &str) -> Box<dyn Command> {
    Box::new(T::with_name(name))
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the types that ship with the launcher.
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        registry
            .register::<crate::commands::ShowConfig>("suiterun::commands::ShowConfig")
            .register_opaque::<crate::config::ConfigLoader>("suiterun::config::ConfigLoader")
            .register_opaque::<CommandRegistry>("suiterun::cli::CommandRegistry");
        registry
    }

    /// Make `T` available under `type_ref`.
    pub fn register<T: CustomCommand>(&mut self, type_ref: &str) -> &mut Self {
        self.catalog.insert(
            type_ref.to_string(),
            CatalogEntry::Command {
                name: T::command_name,
                build: build_command::<T>,
            },
        );
        self
    }

    /// Record `T`, a known type that is not a custom command.
    pub fn register_opaque<T: 'static>(&mut self, type_ref: &str) -> &mut Self {
        self.catalog.insert(
            type_ref.to_string(),
            CatalogEntry::Opaque {
                rust_type: std::any::type_name::<T>,
            },
        );
        self
    }

    fn resolve(&self, type_ref: &str) -> Result<Resolved, LaunchError> {
        match self.catalog.get(type_ref) {
            None => Err(LaunchError::Configuration(format!(
                "Extension: Command class {type_ref} not found"
            ))),
            Some(CatalogEntry::Opaque { rust_type }) => {
                debug!(type_ref, rust_type = rust_type(), "declared type is not a command");
                Err(LaunchError::Configuration(format!(
                    "Extension: Command {type_ref} must implement the `suiterun::cli::CustomCommand` capability"
                )))
            }
            Some(CatalogEntry::Command { name, build }) => Ok(Resolved {
                descriptor: CommandDescriptor {
                    type_ref: type_ref.to_string(),
                    display_name: name().to_string(),
                },
                build: *build,
            }),
        }
    }

    /// Add every command listed in `extensions.commands` to `table`.
    ///
    /// Missing default configuration registers nothing. Every declaration is
    /// validated before the first insertion, so on error `table` is left
    /// untouched. Returns the number of new table entries.
    pub fn register_custom_commands<S>(
        &self,
        source: &mut S,
        table: &mut CommandTable,
    ) -> Result<usize, LaunchError>
    where
        S: ConfigSource + ?Sized,
    {
        let config = match source.load(None) {
            Ok(config) => config,
            Err(err) if err.is_not_found() => {
                debug!("no configuration found, skipping custom commands");
                return Ok(0);
            }
            Err(err) => return Err(err),
        };

        let resolved = config
            .custom_commands()
            .iter()
            .map(|type_ref| self.resolve(type_ref))
            .collect::<Result<Vec<_>, _>>()?;

        let before = table.len();
        for entry in &resolved {
            info!(
                command = %entry.descriptor.display_name,
                type_ref = %entry.descriptor.type_ref,
                "registered custom command"
            );
            table.add(entry.build());
        }
        Ok(table.len() - before)
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.catalog.keys()).finish()
    }
}
