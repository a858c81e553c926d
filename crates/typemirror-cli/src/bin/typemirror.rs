use std::io::{IsTerminal, Write};

use anyhow::Result;
use clap::Parser;

use typemirror_cli::args::CliArgs;
use typemirror_cli::commands::{self, EXIT_SUCCESS};
use typemirror_cli::tracing_config;

fn main() -> Result<()> {
    // No-op unless TYPEMIRROR_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let mut stdout = std::io::stdout();
    let color = !args.no_color && stdout.is_terminal();

    let outcome = commands::run(&args, color)?;
    stdout.write_all(outcome.output.as_bytes())?;
    stdout.flush()?;

    if outcome.exit_code != EXIT_SUCCESS {
        std::process::exit(outcome.exit_code);
    }
    Ok(())
}
