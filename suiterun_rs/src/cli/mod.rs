//! Launcher CLI: argv pre-scan, custom command registration and dispatch.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        User Input (argv)                        │
//! └─────────────────────────────────────────────────────────────────┘
//!                                  │
//!                                  ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      ArgvPreprocessor                           │
//! │   -c / -xc / --config[=]  →  preload ConfigLoader (explicit)    │
//! │   everything else         →  remaining argv                     │
//! └──────────────────────────┬──────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      CommandRegistry                            │
//! │   default config → extensions.commands → validated factories    │
//! │                  → CommandTable                                 │
//! └──────────────────────────┬──────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 Launcher dispatch (by name)                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`preprocess`] - memoized `--config` pre-scan
//! - [`registry`] - type-reference catalog and custom command registration
//! - [`command`] - `Command` trait and the host command table
//! - [`context`] - explicit startup state threaded through both passes
//! - [`entrypoint`] - run loop, usage, error rendering, exit codes

pub mod command;
pub mod context;
pub mod entrypoint;
mod helpers;
pub mod preprocess;
pub mod registry;

pub use command::{Command, CommandTable, Invocation};
pub use context::StartupContext;
pub use entrypoint::{EntryOptions, Launcher, render_error, run};
pub use preprocess::{ArgvPreprocessor, ParsedArguments};
pub use registry::{CommandRegistry, CustomCommand};
