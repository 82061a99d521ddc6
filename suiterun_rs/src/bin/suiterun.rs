use std::any::Any;
use std::panic;

use suiterun::cli::entrypoint::{EntryOptions, run};
use tracing_subscriber::EnvFilter;

fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = <dyn Any>::downcast_ref::<&str>(payload)
            .is_some_and(|s| s.contains("Broken pipe"))
            || <dyn Any>::downcast_ref::<String>(payload)
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            // Quietly exit when downstream closes the pipe (e.g. piping to `head`).
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

/// Logs go to stderr; `SUITERUN_LOG` takes an env-filter directive.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_env("SUITERUN_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn main() {
    install_broken_pipe_handler();
    init_tracing();

    let code = run(&EntryOptions {
        binary_name: "suiterun",
        usage: USAGE,
    });
    std::process::exit(code);
}

const USAGE: &str = "suiterun - test suite launcher\n\n\
Configuration is read from suiterun.toml (layered over suiterun.dist.toml)\n\
in the working directory, or from the path given with -c/--config.\n\
Custom commands are declared under [extensions] commands = [...].";
