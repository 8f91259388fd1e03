//! Cycles command implementation
//!
//! Detects dependency cycles at the requested granularity.

use anyhow::Result;
use sextant::graph::{ComprehensiveCriteria, CycleDetector, Granularity, GraphSummarizer};
use sextant::output::{
    generate_execution_id, output_json, CyclesResponse, JsonResponse, OutputFormat,
};
use std::path::PathBuf;

use crate::session;

/// Run the cycles command
#[allow(clippy::too_many_arguments)]
pub fn run_cycles(
    paths: Vec<PathBuf>,
    includes: Vec<String>,
    excludes: Vec<String>,
    scope: Granularity,
    max_length: Option<usize>,
    output_format: OutputFormat,
    progress: bool,
) -> Result<()> {
    let criteria = session::build_criteria(&includes, &excludes)?;
    let (classfiles, diagnostics) = session::load_classfiles(&paths, progress)?;
    let factory = session::collect_graph(&classfiles, &criteria)?;
    let summarized = GraphSummarizer::new(scope, &ComprehensiveCriteria).summarize(&factory);

    let mut detector = CycleDetector::new(&ComprehensiveCriteria);
    if let Some(max) = max_length {
        detector = detector.with_max_cycle_length(max);
    }
    let cycles: Vec<Vec<String>> = detector
        .find_cycles(&summarized)
        .iter()
        .map(|cycle| {
            cycle
                .path
                .iter()
                .map(|&id| summarized.node(id).name.clone())
                .collect()
        })
        .collect();

    if output_format.is_json() {
        let response = CyclesResponse {
            scope,
            cycle_count: cycles.len(),
            cycles,
            diagnostics,
        };
        let exec_id = generate_execution_id();
        return output_json(&JsonResponse::new(response, &exec_id), output_format);
    }

    if cycles.is_empty() {
        println!("No dependency cycles detected.");
    } else {
        println!("Detected {} cycle(s):", cycles.len());
        for (idx, cycle) in cycles.iter().enumerate() {
            println!("  [{}] {}", idx + 1, cycle.join(" -> "));
        }
    }
    Ok(())
}
