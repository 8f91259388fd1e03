//! Graph command implementation
//!
//! Loads classfiles, collects their dependency graph, and lists the nodes
//! and edges at the requested granularity.

use anyhow::Result;
use sextant::graph::{ComprehensiveCriteria, Granularity, GraphSummarizer};
use sextant::output::{
    generate_execution_id, output_json, snapshot_graph, JsonResponse, OutputFormat,
};
use std::path::PathBuf;

use crate::session;

/// Run the graph command
#[allow(clippy::too_many_arguments)]
pub fn run_graph(
    paths: Vec<PathBuf>,
    includes: Vec<String>,
    excludes: Vec<String>,
    scope: Granularity,
    output_format: OutputFormat,
    progress: bool,
) -> Result<()> {
    let criteria = session::build_criteria(&includes, &excludes)?;
    let (classfiles, diagnostics) = session::load_classfiles(&paths, progress)?;
    let factory = session::collect_graph(&classfiles, &criteria)?;
    let summarized = GraphSummarizer::new(scope, &ComprehensiveCriteria).summarize(&factory);

    let response = snapshot_graph(&summarized, scope, diagnostics);

    if output_format.is_json() {
        let exec_id = generate_execution_id();
        return output_json(&JsonResponse::new(response, &exec_id), output_format);
    }

    println!(
        "{} {} node(s), {} edge(s):",
        response.node_count,
        scope.as_str(),
        response.edge_count
    );
    for node in &response.nodes {
        let marker = if node.confirmed { "" } else { " (inferred)" };
        println!("  {}{}", node.name, marker);
        for edge in response.edges.iter().filter(|e| e.from == node.name) {
            println!("    --> {}", edge.to);
        }
    }
    Ok(())
}
