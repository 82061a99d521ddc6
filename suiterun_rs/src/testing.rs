//! In-memory configuration source for unit tests.

use std::collections::HashMap;
use std::rc::Rc;

use toml::{Table, Value};

use crate::config::{ConfigSource, Configuration};
use crate::error::LaunchError;

pub(crate) fn config_with_commands(source: &str, commands: Option<&[&str]>) -> Rc<Configuration> {
    let mut table = Table::new();
    if let Some(commands) = commands {
        let mut extensions = Table::new();
        extensions.insert(
            "commands".to_string(),
            Value::Array(commands.iter().map(|c| Value::String(c.to_string())).collect()),
        );
        table.insert("extensions".to_string(), Value::Table(extensions));
    }
    Rc::new(Configuration::from_table(source, table).expect("valid test configuration"))
}

/// Records every load request and answers from fixed tables.
#[derive(Default)]
pub(crate) struct FakeSource {
    pub(crate) loads: Vec<Option<String>>,
    files: HashMap<String, Rc<Configuration>>,
    default: Option<Rc<Configuration>>,
    broken: Vec<String>,
    broken_default: bool,
}

impl FakeSource {
    pub(crate) fn with_file(mut self, path: &str, commands: &[&str]) -> Self {
        self.files
            .insert(path.to_string(), config_with_commands(path, Some(commands)));
        self
    }

    pub(crate) fn with_default(mut self, commands: Option<&[&str]>) -> Self {
        self.default = Some(config_with_commands("suiterun.toml", commands));
        self
    }

    pub(crate) fn with_broken_file(mut self, path: &str) -> Self {
        self.broken.push(path.to_string());
        self
    }

    pub(crate) fn with_broken_default(mut self) -> Self {
        self.broken_default = true;
        self
    }
}

impl ConfigSource for FakeSource {
    fn load(&mut self, path: Option<&str>) -> Result<Rc<Configuration>, LaunchError> {
        self.loads.push(path.map(str::to_string));
        match path {
            Some(path) if self.broken.iter().any(|b| b == path) => Err(LaunchError::Parse {
                path: path.to_string(),
                message: "expected `]`".to_string(),
            }),
            Some(path) => self
                .files
                .get(path)
                .cloned()
                .ok_or_else(|| LaunchError::NotFound {
                    location: path.to_string(),
                }),
            None if self.broken_default => Err(LaunchError::Parse {
                path: "suiterun.toml".to_string(),
                message: "expected `]`".to_string(),
            }),
            None => self.default.clone().ok_or_else(|| LaunchError::NotFound {
                location: ".".to_string(),
            }),
        }
    }
}
