//! Launcher entry point shared by the `suiterun` binary and the e2e tests.
//!
//! Startup order is fixed: read argv, pre-scan for `--config`, register the
//! custom commands from configuration, then dispatch the filtered arguments.
//! Any failure before dispatch is rendered as an error block and ends the
//! process with status 1.

use std::io::Write;

use tracing::debug;

use crate::colors::{ColorMode, Painter};
use crate::config::{ConfigLoader, ConfigSource};
use crate::error::LaunchError;

use super::command::{CommandTable, Invocation};
use super::context::StartupContext;
use super::helpers::{is_help_flag, is_version_flag, suggest_similar_command};
use super::registry::CommandRegistry;

/// Options controlling binary-specific behavior.
pub struct EntryOptions {
    /// Name shown in `--version` output and usage.
    pub binary_name: &'static str,
    /// Header printed above the command listing.
    pub usage: &'static str,
}

const GLOBAL_OPTIONS: &[(&str, &str)] = &[
    ("-c, --config <path>", "Use custom path for config"),
    ("-h, --help", "Display help for the given command"),
    ("-V, --version", "Display this application version"),
];

/// Read the process argument vector, without the program name.
///
/// An argument that is not valid Unicode makes the vector unusable for the
/// pre-scan, which is reported the same way as any startup misconfiguration.
pub fn raw_argv() -> Result<Vec<String>, LaunchError> {
    // nosemgrep: rust.lang.security.args.args
    // args_os() is only read for option parsing; argv[0] is skipped.
    std::env::args_os()
        .skip(1)
        .map(|arg| {
            arg.into_string().map_err(|bad| {
                LaunchError::Configuration(format!(
                    "Argument {bad:?} is not valid UTF-8; the argument vector must be readable to run suiterun"
                ))
            })
        })
        .collect()
}

/// Launcher state: startup context, factory catalog and the host table.
pub struct Launcher<S = ConfigLoader> {
    binary_name: &'static str,
    usage: &'static str,
    context: StartupContext<S>,
    registry: CommandRegistry,
    table: CommandTable,
}

impl<S: ConfigSource> Launcher<S> {
    pub fn new(opts: &EntryOptions, context: StartupContext<S>, registry: CommandRegistry) -> Self {
        Self {
            binary_name: opts.binary_name,
            usage: opts.usage,
            context,
            registry,
            table: CommandTable::new(),
        }
    }

    /// Pre-scan argv and register configured custom commands.
    pub fn start(&mut self) -> Result<usize, LaunchError> {
        let added = self
            .context
            .register_custom_commands(&self.registry, &mut self.table)?;
        debug!(added, total = self.table.len(), "command table ready");
        Ok(added)
    }

    /// Start, then dispatch the filtered arguments. Returns the exit status.
    pub fn run(&mut self, out: &mut dyn Write, painter: Painter) -> anyhow::Result<i32> {
        self.start()?;

        let parsed = self.context.core_arguments()?.clone();
        let name_pos = parsed.remaining.iter().position(|a| !a.starts_with('-'));
        let leading = &parsed.remaining[..name_pos.unwrap_or(parsed.remaining.len())];

        if leading.iter().any(|a| is_version_flag(a)) {
            writeln!(out, "{} {}", self.binary_name, env!("CARGO_PKG_VERSION"))?;
            return Ok(0);
        }

        let Some(pos) = name_pos else {
            self.write_usage(out, painter)?;
            return Ok(0);
        };

        let name = parsed.remaining[pos].as_str();
        if leading.iter().any(|a| is_help_flag(a)) {
            self.write_usage(out, painter)?;
            return Ok(0);
        }

        // Registered commands shadow the builtin `list` and `help` names.
        let Some(command) = self.table.get(name) else {
            if name == "list" || name == "help" {
                self.write_usage(out, painter)?;
                return Ok(0);
            }
            let mut message = format!("Command \"{name}\" is not defined.");
            if let Some(suggestion) = suggest_similar_command(name, self.table.names()) {
                message.push_str(&format!(" Did you mean \"{suggestion}\"?"));
            }
            anyhow::bail!(message);
        };

        let config = match self.context.source_mut().load(None) {
            Ok(config) => Some(config),
            Err(err) if err.is_not_found() => None,
            Err(err) => return Err(err.into()),
        };

        let args: Vec<String> = parsed
            .remaining
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != pos)
            .map(|(_, a)| a.clone())
            .collect();

        debug!(command = name, ?args, "dispatching");
        command.execute(
            &Invocation {
                args: &args,
                config_path: parsed.config_path.as_deref(),
                config: config.as_deref(),
            },
            out,
        )
    }

    fn write_usage(&self, out: &mut dyn Write, painter: Painter) -> std::io::Result<()> {
        writeln!(out, "{}", self.usage)?;
        writeln!(out)?;
        writeln!(out, "{}", painter.header("Usage:"))?;
        writeln!(out, "  {} [options] <command> [arguments]", self.binary_name)?;
        writeln!(out)?;

        writeln!(out, "{}", painter.header("Options:"))?;
        for (flag, help) in GLOBAL_OPTIONS {
            writeln!(out, "  {:<22} {}", painter.command(flag), help)?;
        }
        writeln!(out)?;

        writeln!(out, "{}", painter.header("Available commands:"))?;
        if self.table.is_empty() {
            writeln!(out, "  {}", painter.dim("(none registered)"))?;
        }
        let width = self.table.names().map(str::len).max().unwrap_or(0);
        for (name, description) in self.table.entries() {
            let padded = format!("{name:<width$}");
            writeln!(out, "  {}  {}", painter.command(&padded), description)?;
        }
        Ok(())
    }
}

/// Render an error as a framed block.
pub fn render_error(err: &anyhow::Error, out: &mut dyn Write, painter: Painter) {
    let lines: Vec<String> = err.chain().map(|cause| cause.to_string()).collect();
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
    let blank = " ".repeat(width);

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", painter.error_block(&blank));
    for line in &lines {
        let padded = format!("  {line:<w$}  ", w = width - 4);
        let _ = writeln!(out, "{}", painter.error_block(&padded));
    }
    let _ = writeln!(out, "{}", painter.error_block(&blank));
    let _ = writeln!(out);
}

/// Exit status for a failed run.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<LaunchError>()
        .map_or(1, LaunchError::exit_code)
}

/// Run the launcher for the current process. This is the shared main() body.
pub fn run(opts: &EntryOptions) -> i32 {
    let mode = ColorMode::from_env();
    let mut stdout = std::io::stdout().lock();

    let result = raw_argv().map_err(anyhow::Error::from).and_then(|argv| {
        let context = StartupContext::new(argv, ConfigLoader::from_current_dir());
        let mut launcher = Launcher::new(opts, context, CommandRegistry::with_builtin_types());
        launcher.run(&mut stdout, Painter::stdout(mode))
    });
    let _ = stdout.flush();

    match result {
        Ok(code) => code,
        Err(err) => {
            debug!(error = %err, "launcher failed");
            render_error(&err, &mut std::io::stderr().lock(), Painter::stderr(mode));
            exit_code_for(&err)
        }
    }
}
