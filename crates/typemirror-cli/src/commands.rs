//! Subcommand dispatch.
//!
//! Every subcommand produces an [`Outcome`]; the binary only prints it and
//! exits with its code, which keeps the commands testable in-process.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info_span};
use typemirror::{Mirror, MirrorResult, Reflector};

use crate::args::{CliArgs, Command, OutputFormat};
use crate::render::TextRenderer;
use crate::report::{self, TypeReport};

pub const EXIT_SUCCESS: i32 = 0;
/// The named module, class or type does not exist.
pub const EXIT_NOT_FOUND: i32 = 1;
/// `check` hit a declaration the reflector cannot classify or resolve.
pub const EXIT_SCHEMA_ERROR: i32 = 2;

/// Rendered output of one command plus the process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub exit_code: i32,
}

impl Outcome {
    fn success(output: String) -> Self {
        Self {
            output,
            exit_code: EXIT_SUCCESS,
        }
    }

    fn not_found(output: String) -> Self {
        Self {
            output,
            exit_code: EXIT_NOT_FOUND,
        }
    }
}

/// Read and parse a TypeDoc JSON file.
pub fn load(path: &Path) -> Result<Reflector> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let reflector = Reflector::from_json_str(&text)
        .with_context(|| format!("failed to load {}", path.display()))?;
    debug!(
        declarations = reflector.registry().len(),
        "document loaded"
    );
    Ok(reflector)
}

pub fn run(args: &CliArgs, color: bool) -> Result<Outcome> {
    let _span = info_span!("run", file = %args.file.display()).entered();
    let reflector = load(&args.file)?;
    let renderer = TextRenderer::new(color);
    let json = args.format == OutputFormat::Json;

    match &args.command {
        Command::Modules => {
            let mut names = reflector.module_names()?;
            names.sort_unstable();
            let output = if json {
                to_json(&names)?
            } else {
                renderer.modules(&names)
            };
            Ok(Outcome::success(output))
        }
        Command::Module { name } => {
            let Some(module) = reflector.describe_module(name)? else {
                let output = if json {
                    "null\n".to_string()
                } else {
                    format!("no module named {name}\n")
                };
                return Ok(Outcome::not_found(output));
            };
            let report = report::module_report(module)?;
            let output = if json {
                to_json(&report)?
            } else {
                renderer.module(&report)
            };
            Ok(Outcome::success(output))
        }
        Command::Class { name } => {
            let classes = reflector.find_classes_by_name(name)?;
            let reports = type_reports(&reflector, classes.iter().map(|class| **class))?;
            types_outcome(&reports, "class", name, json, &renderer)
        }
        Command::Type { name } => {
            let types = reflector.find_types_by_name(name)?;
            let reports = type_reports(&reflector, types.into_iter())?;
            types_outcome(&reports, "type", name, json, &renderer)
        }
        Command::Check => {
            let report = report::check_report(&reflector);
            let exit_code = if report.ok {
                EXIT_SUCCESS
            } else {
                EXIT_SCHEMA_ERROR
            };
            let output = if json {
                to_json(&report)?
            } else {
                renderer.check(&report)
            };
            Ok(Outcome { output, exit_code })
        }
    }
}

fn type_reports<'r>(
    reflector: &'r Reflector,
    mirrors: impl Iterator<Item = Mirror<'r>>,
) -> MirrorResult<Vec<TypeReport>> {
    mirrors
        .map(|mirror| report::type_report(reflector, mirror))
        .collect()
}

fn types_outcome(
    reports: &[TypeReport],
    what: &str,
    name: &str,
    json: bool,
    renderer: &TextRenderer,
) -> Result<Outcome> {
    let output = if json {
        to_json(reports)?
    } else if reports.is_empty() {
        format!("no {what} named {name}\n")
    } else {
        reports
            .iter()
            .map(|report| renderer.type_report(report))
            .collect::<Vec<_>>()
            .join("\n")
    };

    if reports.is_empty() {
        Ok(Outcome::not_found(output))
    } else {
        Ok(Outcome::success(output))
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
#[path = "../tests/cli_tests.rs"]
mod tests;
