//! Types that ship with the launcher and can be named in configuration.

use std::io::Write;

use crate::cli::{Command, CustomCommand, Invocation};

/// `config:show` - print which configuration the launcher resolved.
#[derive(Debug, Clone)]
pub struct ShowConfig {
    name: String,
}

impl CustomCommand for ShowConfig {
    fn command_name() -> &'static str {
        "config:show"
    }

    fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Command for ShowConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Show the configuration file in effect and its custom commands"
    }

    fn execute(&self, invocation: &Invocation<'_>, out: &mut dyn Write) -> anyhow::Result<i32> {
        let Some(config) = invocation.config else {
            writeln!(out, "No configuration found")?;
            return Ok(0);
        };

        writeln!(out, "Configuration: {}", config.source().display())?;
        if let Some(path) = invocation.config_path {
            writeln!(out, "Override: {path}")?;
        }
        if config.custom_commands().is_empty() {
            writeln!(out, "Custom commands: none")?;
        } else {
            writeln!(out, "Custom commands:")?;
            for type_ref in config.custom_commands() {
                writeln!(out, "  {type_ref}")?;
            }
        }
        Ok(0)
    }
}
