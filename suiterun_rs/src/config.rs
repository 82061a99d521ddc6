//! Configuration file support for suiterun.
//!
//! Locates `suiterun.toml` (optionally layered over `suiterun.dist.toml`)
//! either from an explicit path or from the working directory, and keeps
//! every parsed configuration for the rest of the process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Deserialize;
use toml::{Table, Value};
use tracing::debug;

use crate::error::LaunchError;

/// Local configuration file name.
pub const CONFIG_FILE: &str = "suiterun.toml";

/// Shared defaults, overridden by [`CONFIG_FILE`] when both exist.
pub const DIST_CONFIG_FILE: &str = "suiterun.dist.toml";

/// `[extensions]` section.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ExtensionsConfig {
    /// Type references of custom commands, in registration order.
    /// Example: `["suiterun::commands::ShowConfig"]`
    pub commands: Vec<String>,
}

/// The sections this crate reads; everything else stays opaque.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KnownSections {
    extensions: ExtensionsConfig,
}

/// A loaded configuration source.
#[derive(Debug, Clone)]
pub struct Configuration {
    source: PathBuf,
    settings: Table,
    extensions: ExtensionsConfig,
}

impl Configuration {
    /// Build a configuration from an already parsed table.
    pub fn from_table(source: impl Into<PathBuf>, settings: Table) -> Result<Self, LaunchError> {
        let source = source.into();
        let known: KnownSections = Value::Table(settings.clone())
            .try_into()
            .map_err(|e| LaunchError::Parse {
                path: source.display().to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            source,
            settings,
            extensions: known.extensions,
        })
    }

    /// File the configuration was read from (the local file when layered).
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Raw settings table.
    pub fn settings(&self) -> &Table {
        &self.settings
    }

    /// `extensions.commands`, empty when absent.
    pub fn custom_commands(&self) -> &[String] {
        &self.extensions.commands
    }
}

/// Anything that can hand out configurations by optional explicit path.
///
/// `None` asks for the default configuration: whatever an explicit load
/// already selected, otherwise the result of default discovery.
pub trait ConfigSource {
    fn load(&mut self, path: Option<&str>) -> Result<Rc<Configuration>, LaunchError>;
}

/// Filesystem-backed [`ConfigSource`] with a per-path cache.
#[derive(Debug)]
pub struct ConfigLoader {
    base_dir: PathBuf,
    cache: HashMap<Vec<PathBuf>, Rc<Configuration>>,
    active: Option<Rc<Configuration>>,
    parse_count: usize,
}

impl ConfigLoader {
    /// Loader resolving relative paths and default discovery against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            cache: HashMap::new(),
            active: None,
            parse_count: 0,
        }
    }

    /// Loader rooted at the process working directory.
    pub fn from_current_dir() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Number of files actually read and parsed so far.
    pub fn parse_count(&self) -> usize {
        self.parse_count
    }

    fn resolve_explicit(&self, path: &str) -> Result<Vec<PathBuf>, LaunchError> {
        let candidate = self.base_dir.join(path);
        if candidate.is_dir() {
            return locate_in_dir(&candidate).ok_or_else(|| LaunchError::NotFound {
                location: candidate.display().to_string(),
            });
        }
        if candidate.is_file() {
            return Ok(vec![candidate]);
        }
        Err(LaunchError::NotFound {
            location: candidate.display().to_string(),
        })
    }

    fn load_files(&mut self, files: Vec<PathBuf>) -> Result<Rc<Configuration>, LaunchError> {
        let key: Vec<PathBuf> = files
            .iter()
            .map(|f| f.canonicalize().unwrap_or_else(|_| f.clone()))
            .collect();

        if let Some(config) = self.cache.get(&key) {
            debug!(files = ?key, "configuration cache hit");
            return Ok(Rc::clone(config));
        }

        let mut merged = Table::new();
        for file in &key {
            let table = read_table(file)?;
            self.parse_count += 1;
            merge_tables(&mut merged, table);
        }

        let source = key.last().cloned().unwrap_or_else(|| self.base_dir.clone());
        debug!(source = %source.display(), "configuration loaded");
        let config = Rc::new(Configuration::from_table(source, merged)?);
        self.cache.insert(key, Rc::clone(&config));
        Ok(config)
    }
}

impl ConfigSource for ConfigLoader {
    fn load(&mut self, path: Option<&str>) -> Result<Rc<Configuration>, LaunchError> {
        let files = match path {
            Some(path) => self.resolve_explicit(path)?,
            None => {
                if let Some(active) = &self.active {
                    return Ok(Rc::clone(active));
                }
                locate_in_dir(&self.base_dir).ok_or_else(|| LaunchError::NotFound {
                    location: self.base_dir.display().to_string(),
                })?
            }
        };

        let config = self.load_files(files)?;
        self.active = Some(Rc::clone(&config));
        Ok(config)
    }
}

/// Configuration files in `dir`, base first.
fn locate_in_dir(dir: &Path) -> Option<Vec<PathBuf>> {
    let local = dir.join(CONFIG_FILE);
    let dist = dir.join(DIST_CONFIG_FILE);

    match (dist.is_file(), local.is_file()) {
        (true, true) => Some(vec![dist, local]),
        (true, false) => Some(vec![dist]),
        (false, true) => Some(vec![local]),
        (false, false) => None,
    }
}

fn read_table(path: &Path) -> Result<Table, LaunchError> {
    let parse_error = |message: String| LaunchError::Parse {
        path: path.display().to_string(),
        message,
    };
    let content = std::fs::read_to_string(path).map_err(|e| parse_error(e.to_string()))?;
    toml::from_str::<Table>(&content).map_err(|e| parse_error(e.to_string()))
}

/// Tables merge key by key; any other overlay value replaces the base.
fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        let Value::Table(incoming) = value else {
            base.insert(key, value);
            continue;
        };
        if let Some(Value::Table(existing)) = base.get_mut(&key) {
            merge_tables(existing, incoming);
            continue;
        }
        base.insert(key, Value::Table(incoming));
    }
}
