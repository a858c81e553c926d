use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the typemirror binary.
#[derive(Parser, Debug)]
#[command(
    name = "typemirror",
    version,
    about = "Browse the declarations of a TypeDoc JSON document"
)]
pub struct CliArgs {
    /// TypeDoc JSON file to load.
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, ignore_case = true)]
    pub format: OutputFormat,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List module names, sorted.
    Modules,

    /// Describe one module: original name, namespaces and members.
    Module {
        /// Module name, with or without surrounding quotes.
        name: String,
    },

    /// Describe every class with the given name.
    Class { name: String },

    /// Describe every class, interface, enum or type alias with the given name.
    Type { name: String },

    /// Resolve every declaration and report schema errors and optionality
    /// mismatches.
    Check,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod tests;
