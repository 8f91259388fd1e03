//! Closure command implementation
//!
//! Computes the transitive closure or reduction of package dependencies.

use anyhow::Result;
use sextant::graph::{
    maximize_links, minimize_links, ComprehensiveCriteria, Granularity, GraphSummarizer,
};
use sextant::output::{
    generate_execution_id, output_json, snapshot_graph, ClosureResponse, JsonResponse,
    OutputFormat,
};
use std::path::PathBuf;

use crate::session;

/// Run the closure command
pub fn run_closure(
    paths: Vec<PathBuf>,
    includes: Vec<String>,
    excludes: Vec<String>,
    maximize: bool,
    output_format: OutputFormat,
    progress: bool,
) -> Result<()> {
    let criteria = session::build_criteria(&includes, &excludes)?;
    let (classfiles, diagnostics) = session::load_classfiles(&paths, progress)?;
    let factory = session::collect_graph(&classfiles, &criteria)?;
    let mut summarized =
        GraphSummarizer::new(Granularity::Package, &ComprehensiveCriteria).summarize(&factory);

    let operation = if maximize {
        maximize_links(&mut summarized);
        "maximize"
    } else {
        minimize_links(&mut summarized);
        "minimize"
    };

    let graph = snapshot_graph(&summarized, Granularity::Package, diagnostics);

    if output_format.is_json() {
        let response = ClosureResponse {
            operation: operation.to_string(),
            node_count: graph.node_count,
            edge_count: graph.edge_count,
            edges: graph.edges,
            diagnostics,
        };
        let exec_id = generate_execution_id();
        return output_json(&JsonResponse::new(response, &exec_id), output_format);
    }

    println!(
        "{} packages, {} edge(s) after {}:",
        graph.node_count, graph.edge_count, operation
    );
    for edge in &graph.edges {
        println!("  {} --> {}", edge.from, edge.to);
    }
    Ok(())
}
