//! JSON output module for CLI commands
//!
//! Provides schema-versioned response types for all analysis commands.

pub mod command;

pub use command::{
    generate_execution_id, output_json, snapshot_graph, ClosureResponse, CyclesResponse,
    EdgeEntry, ErrorResponse, GraphResponse, JsonResponse, MetricsResponse, NodeEntry,
    OutputFormat, SEXTANT_JSON_SCHEMA_VERSION,
};
