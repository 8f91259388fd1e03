//! Metrics command implementation
//!
//! Shows structural counts over the loaded classfiles.

use anyhow::Result;
use sextant::classfile::metrics::MetricsGatherer;
use sextant::output::{
    generate_execution_id, output_json, JsonResponse, MetricsResponse, OutputFormat,
};
use std::path::PathBuf;

use crate::session;

/// Run the metrics command
pub fn run_metrics(
    paths: Vec<PathBuf>,
    output_format: OutputFormat,
    progress: bool,
) -> Result<()> {
    let (classfiles, diagnostics) = session::load_classfiles(&paths, progress)?;

    let mut gatherer = MetricsGatherer::new();
    for classfile in &classfiles {
        gatherer.visit(classfile);
    }
    let report = gatherer.into_report();

    if output_format.is_json() {
        let response = MetricsResponse {
            report,
            diagnostics,
        };
        let exec_id = generate_execution_id();
        return output_json(&JsonResponse::new(response, &exec_id), output_format);
    }

    println!("Classfiles:   {}", report.classfiles);
    println!("  classes:    {}", report.classes);
    println!("  interfaces: {}", report.interfaces);
    println!("Fields:       {}", report.fields);
    println!("Methods:      {}", report.methods);
    println!("  abstract:   {}", report.abstract_methods);
    println!("Visibility (members):");
    println!("  public:     {}", report.public_members);
    println!("  protected:  {}", report.protected_members);
    println!("  private:    {}", report.private_members);
    println!("  package:    {}", report.package_members);
    println!("Code bytes:   {}", report.code_bytes);
    if !report.instructions.is_empty() {
        println!("Top instructions:");
        let mut by_count: Vec<_> = report.instructions.iter().collect();
        by_count.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (mnemonic, count) in by_count.into_iter().take(10) {
            println!("  {mnemonic:<16} {count}");
        }
    }
    if diagnostics > 0 {
        eprintln!("{diagnostics} entr(ies) skipped or failed; see stderr above");
    }
    Ok(())
}
