//! CLI argument parsing for Sextant
//!
//! Defines the Command enum and parse_args() function for all CLI commands.

use anyhow::{bail, Result};
use sextant::graph::Granularity;
use sextant::output::OutputFormat;
use std::path::PathBuf;

pub fn print_usage() {
    eprintln!("Sextant - Java bytecode dependency graph analyzer");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  sextant <command> [arguments]");
    eprintln!("  sextant --help");
    eprintln!("  sextant --version");
    eprintln!();
    eprintln!("  sextant graph --path <DIR|JAR|CLASS>... [--include <RE>]... [--exclude <RE>]... [--scope <SCOPE>] [--output <FORMAT>]");
    eprintln!("  sextant cycles --path <DIR|JAR|CLASS>... [--include <RE>]... [--exclude <RE>]... [--scope <SCOPE>] [--max-length <N>] [--output <FORMAT>]");
    eprintln!("  sextant closure --path <DIR|JAR|CLASS>... (--maximize | --minimize) [--include <RE>]... [--exclude <RE>]... [--output <FORMAT>]");
    eprintln!("  sextant metrics --path <DIR|JAR|CLASS>... [--output <FORMAT>]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  graph     Extract the dependency graph and list its nodes and edges");
    eprintln!("  cycles    Detect dependency cycles");
    eprintln!("  closure   Compute the transitive closure or reduction of package links");
    eprintln!("  metrics   Show structural metrics over the loaded classfiles");
    eprintln!();
    eprintln!("Global arguments:");
    eprintln!("  --path <LOC>        Input location: directory, .jar/.zip archive, or .class file (repeatable)");
    eprintln!("  --output <FORMAT>   Output format: human (default), json (compact), or pretty (formatted)");
    eprintln!("  --progress          Show a progress bar while loading");
    eprintln!();
    eprintln!("Graph/cycles arguments:");
    eprintln!("  --include <RE>      Only collect names matching this pattern (repeatable)");
    eprintln!("  --exclude <RE>      Never collect names matching this pattern (repeatable)");
    eprintln!("                      Patterns use Perl syntax: /re/, m=re=, trailing 'i' for case-insensitive;");
    eprintln!("                      a bare pattern is taken as /re/");
    eprintln!("  --scope <SCOPE>     Graph granularity: package (default), class, or feature");
    eprintln!();
    eprintln!("Cycles arguments:");
    eprintln!("  --max-length <N>    Only report cycles of at most N nodes");
    eprintln!();
    eprintln!("Closure arguments:");
    eprintln!("  --maximize          Add a direct edge for every indirect package dependency");
    eprintln!("  --minimize          Remove every package edge implied by another path");
}

pub enum Command {
    Graph {
        paths: Vec<PathBuf>,
        includes: Vec<String>,
        excludes: Vec<String>,
        scope: Granularity,
        output_format: OutputFormat,
        progress: bool,
    },
    Cycles {
        paths: Vec<PathBuf>,
        includes: Vec<String>,
        excludes: Vec<String>,
        scope: Granularity,
        max_length: Option<usize>,
        output_format: OutputFormat,
        progress: bool,
    },
    Closure {
        paths: Vec<PathBuf>,
        includes: Vec<String>,
        excludes: Vec<String>,
        maximize: bool,
        output_format: OutputFormat,
        progress: bool,
    },
    Metrics {
        paths: Vec<PathBuf>,
        output_format: OutputFormat,
        progress: bool,
    },
    Version,
    Help,
}

/// Parse command-line arguments into a Command
pub fn parse_args(args: &[String]) -> Result<Command> {
    if args.is_empty() {
        return Ok(Command::Help);
    }
    match args[0].as_str() {
        "--help" | "-h" | "help" => return Ok(Command::Help),
        "--version" | "-V" => return Ok(Command::Version),
        _ => {}
    }

    let command = args[0].as_str();
    let rest = &args[1..];

    let mut paths: Vec<PathBuf> = Vec::new();
    let mut includes: Vec<String> = Vec::new();
    let mut excludes: Vec<String> = Vec::new();
    let mut scope = Granularity::Package;
    let mut max_length: Option<usize> = None;
    let mut maximize: Option<bool> = None;
    let mut output_format = OutputFormat::Human;
    let mut progress = false;

    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--path" => {
                paths.push(PathBuf::from(value(rest, &mut i, "--path")?));
            }
            "--include" => {
                includes.push(value(rest, &mut i, "--include")?.to_string());
            }
            "--exclude" => {
                excludes.push(value(rest, &mut i, "--exclude")?.to_string());
            }
            "--scope" => {
                let raw = value(rest, &mut i, "--scope")?;
                scope = raw.parse().map_err(anyhow::Error::msg)?;
            }
            "--max-length" => {
                let raw = value(rest, &mut i, "--max-length")?;
                let parsed: usize = raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("--max-length expects a number, got '{raw}'"))?;
                if parsed == 0 {
                    bail!("--max-length must be at least 1");
                }
                max_length = Some(parsed);
            }
            "--maximize" => maximize = Some(true),
            "--minimize" => maximize = Some(false),
            "--output" => {
                let raw = value(rest, &mut i, "--output")?;
                output_format = OutputFormat::from_str(raw)
                    .ok_or_else(|| anyhow::anyhow!("invalid output format '{raw}'"))?;
            }
            "--progress" => progress = true,
            other => bail!("unknown argument '{other}'"),
        }
        i += 1;
    }

    if command != "help" && paths.is_empty() {
        bail!("{command} requires at least one --path");
    }

    match command {
        "graph" => Ok(Command::Graph {
            paths,
            includes,
            excludes,
            scope,
            output_format,
            progress,
        }),
        "cycles" => Ok(Command::Cycles {
            paths,
            includes,
            excludes,
            scope,
            max_length,
            output_format,
            progress,
        }),
        "closure" => {
            let Some(maximize) = maximize else {
                bail!("closure requires --maximize or --minimize");
            };
            Ok(Command::Closure {
                paths,
                includes,
                excludes,
                maximize,
                output_format,
                progress,
            })
        }
        "metrics" => Ok(Command::Metrics {
            paths,
            output_format,
            progress,
        }),
        other => bail!("unknown command '{other}'"),
    }
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("{flag} requires a value"))
}
