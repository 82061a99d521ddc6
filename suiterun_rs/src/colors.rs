//! Terminal color utilities for launcher output.
//!
//! Provides ANSI color codes and a small painter used by the usage listing
//! and the error block.

use std::io::IsTerminal;

// ============================================================================
// ANSI Color Codes
// ============================================================================

pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RESET: &str = "\x1b[0m";

pub const WHITE_ON_RED: &str = "\x1b[97;41m";

// ============================================================================
// Color State
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `NO_COLOR` (any value) turns auto detection off.
    pub fn from_env() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            ColorMode::Never
        } else {
            ColorMode::Auto
        }
    }
}

/// Colorizer that can be passed around to format functions.
#[derive(Clone, Copy, Debug)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    /// Painter for stdout.
    pub fn stdout(mode: ColorMode) -> Self {
        Self::resolve(mode, std::io::stdout().is_terminal())
    }

    /// Painter for stderr, where errors are rendered.
    pub fn stderr(mode: ColorMode) -> Self {
        Self::resolve(mode, std::io::stderr().is_terminal())
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    fn resolve(mode: ColorMode, is_terminal: bool) -> Self {
        let enabled = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => is_terminal,
        };
        Self { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Command names - GREEN
    pub fn command(&self, s: &str) -> String {
        self.wrap(s, GREEN)
    }

    /// Section headers - YELLOW
    pub fn header(&self, s: &str) -> String {
        self.wrap(s, YELLOW)
    }

    /// Secondary info, hints - DIM
    pub fn dim(&self, s: &str) -> String {
        self.wrap(s, DIM)
    }

    /// Error block line - white on red, bold
    pub fn error_block(&self, s: &str) -> String {
        if self.enabled {
            format!("{BOLD}{WHITE_ON_RED}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    pub fn wrap(&self, s: &str, code: &str) -> String {
        if self.enabled {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}
