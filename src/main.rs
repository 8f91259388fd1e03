//! Sextant CLI - deterministic Java bytecode dependency analysis
//!
//! Usage: sextant <command> [arguments]

mod cli;
mod closure_cmd;
mod cycles_cmd;
mod graph_cmd;
mod metrics_cmd;
mod session;

use std::process::ExitCode;

use cli::Command;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let command = match cli::parse_args(&args) {
        Ok(command) => command,
        Err(error) => {
            eprintln!("Error: {error}");
            eprintln!();
            cli::print_usage();
            return ExitCode::from(2);
        }
    };

    let result = match command {
        Command::Help => {
            cli::print_usage();
            Ok(())
        }
        Command::Version => {
            println!("{}", sextant::version::version());
            Ok(())
        }
        Command::Graph {
            paths,
            includes,
            excludes,
            scope,
            output_format,
            progress,
        } => graph_cmd::run_graph(paths, includes, excludes, scope, output_format, progress),
        Command::Cycles {
            paths,
            includes,
            excludes,
            scope,
            max_length,
            output_format,
            progress,
        } => cycles_cmd::run_cycles(
            paths,
            includes,
            excludes,
            scope,
            max_length,
            output_format,
            progress,
        ),
        Command::Closure {
            paths,
            includes,
            excludes,
            maximize,
            output_format,
            progress,
        } => closure_cmd::run_closure(paths, includes, excludes, maximize, output_format, progress),
        Command::Metrics {
            paths,
            output_format,
            progress,
        } => metrics_cmd::run_metrics(paths, output_format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
