//! Host command table.
//!
//! Commands are looked up by display name. Builtin test-execution commands
//! live outside this crate and are registered the same way as custom ones.

use std::collections::BTreeMap;
use std::io::Write;

use crate::config::Configuration;

/// What a command sees when it runs.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// Arguments after the command name, config tokens already removed.
    pub args: &'a [String],
    /// Explicit config override, if one was given.
    pub config_path: Option<&'a str>,
    /// Configuration in effect, `None` when none was found.
    pub config: Option<&'a Configuration>,
}

/// A dispatchable command.
pub trait Command {
    /// Key in the command table.
    fn name(&self) -> &str;

    /// One-line summary for the usage listing.
    fn description(&self) -> &str {
        ""
    }

    /// Run the command and return its exit status.
    fn execute(&self, invocation: &Invocation<'_>, out: &mut dyn Write) -> anyhow::Result<i32>;
}

/// Commands keyed by display name, listed in name order.
#[derive(Default)]
pub struct CommandTable {
    commands: BTreeMap<String, Box<dyn Command>>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `command` under its own name, replacing any previous entry.
    pub fn add(&mut self, command: Box<dyn Command>) {
        self.commands.insert(command.name().to_string(), command);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// `(name, description)` pairs in name order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.commands
            .iter()
            .map(|(name, cmd)| (name.as_str(), cmd.description()))
    }
}

impl std::fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.commands.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo(&'static str);

    impl Command for Echo {
        fn name(&self) -> &str {
            self.0
        }

        fn execute(&self, invocation: &Invocation<'_>, out: &mut dyn Write) -> anyhow::Result<i32> {
            writeln!(out, "{}", invocation.args.join(" "))?;
            Ok(0)
        }
    }

    #[test]
    fn test_add_and_lookup() {
        let mut table = CommandTable::new();
        assert!(table.is_empty());

        table.add(Box::new(Echo("b:two")));
        table.add(Box::new(Echo("a:one")));

        assert_eq!(table.len(), 2);
        assert!(table.contains("a:one"));
        assert_eq!(table.names().collect::<Vec<_>>(), ["a:one", "b:two"]);

        let args = vec!["hello".to_string(), "world".to_string()];
        let mut out = Vec::new();
        let code = table
            .get("b:two")
            .expect("registered")
            .execute(
                &Invocation {
                    args: &args,
                    config_path: None,
                    config: None,
                },
                &mut out,
            )
            .expect("echo runs");
        assert_eq!(code, 0);
        assert_eq!(String::from_utf8_lossy(&out), "hello world\n");
    }

    #[test]
    fn test_same_name_replaces() {
        let mut table = CommandTable::new();
        table.add(Box::new(Echo("run")));
        table.add(Box::new(Echo("run")));
        assert_eq!(table.len(), 1);
    }
}
