//! # suiterun
//!
//! Launcher for the suiterun test runner. Before the CLI dispatches, it
//! pre-scans argv for a `--config` / `-c` override, loads that configuration
//! early, and extends the command table with the custom commands the
//! configuration declares.
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use suiterun::cli::{CommandRegistry, CommandTable, StartupContext};
//! use suiterun::config::ConfigLoader;
//!
//! let argv = vec!["-c".to_string(), "ci/suiterun.toml".to_string(), "run".to_string()];
//! let mut ctx = StartupContext::new(argv, ConfigLoader::from_current_dir());
//! let mut table = CommandTable::new();
//!
//! ctx.register_custom_commands(&CommandRegistry::with_builtin_types(), &mut table)?;
//! assert_eq!(ctx.core_arguments()?.remaining, ["run"]);
//! # Ok::<(), suiterun::LaunchError>(())
//! ```
//!
//! ## Custom Commands
//!
//! ```toml
//! # suiterun.toml
//! [extensions]
//! commands = ["suiterun::commands::ShowConfig"]
//! ```

/// Argv pre-scan, custom command registry and the launcher run loop.
pub mod cli;

/// ANSI painter for usage and error output.
pub mod colors;

/// Types that ship with the launcher and can be named in configuration.
pub mod commands;

/// Configuration discovery, loading and caching.
///
/// # Example
///
/// ```rust,no_run
/// use suiterun::config::{ConfigLoader, ConfigSource};
///
/// let mut loader = ConfigLoader::from_current_dir();
/// match loader.load(None) {
///     Ok(config) => println!("custom commands: {:?}", config.custom_commands()),
///     Err(err) if err.is_not_found() => println!("no configuration"),
///     Err(err) => eprintln!("{err}"),
/// }
/// ```
pub mod config;

/// Startup error kinds.
pub mod error;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports for convenience
// ============================================================================

/// Startup error type.
pub use error::LaunchError;

/// Loaded configuration.
pub use config::Configuration;

/// Filesystem configuration loader.
pub use config::ConfigLoader;
