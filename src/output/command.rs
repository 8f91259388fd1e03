//! JSON output types for CLI commands
//!
//! Provides schema-versioned response types for every command. All JSON
//! output goes through [`JsonResponse`] so consumers can gate parsing on
//! `schema_version`.

use serde::Serialize;

use crate::classfile::metrics::MetricsReport;
use crate::graph::{Granularity, NodeFactory, NodeId};

/// Schema version for JSON output. Bump on breaking response changes.
pub const SEXTANT_JSON_SCHEMA_VERSION: &str = "1.0.0";

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output
    Human,
    /// Compact JSON with schema versioning
    Json,
    /// Pretty-printed JSON with schema versioning
    Pretty,
}

impl OutputFormat {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Some(OutputFormat::Human),
            "json" => Some(OutputFormat::Json),
            "pretty" => Some(OutputFormat::Pretty),
            _ => None,
        }
    }

    pub fn is_json(self) -> bool {
        !matches!(self, OutputFormat::Human)
    }
}

/// Envelope for all JSON responses
#[derive(Debug, Serialize)]
pub struct JsonResponse<T> {
    /// Schema version for parsing stability
    pub schema_version: String,
    /// Tool identifier
    pub tool: String,
    /// Unique execution ID for this run
    pub execution_id: String,
    /// Response data
    pub data: T,
}

impl<T> JsonResponse<T> {
    pub fn new(data: T, execution_id: &str) -> Self {
        JsonResponse {
            schema_version: SEXTANT_JSON_SCHEMA_VERSION.to_string(),
            tool: "sextant".to_string(),
            execution_id: execution_id.to_string(),
            data,
        }
    }
}

/// Generate a unique execution ID for this run
///
/// Uses timestamp + process ID for uniqueness.
pub fn generate_execution_id() -> String {
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let pid = process::id();

    format!("{:x}-{:x}", timestamp, pid)
}

/// Serialize to stdout, compact or pretty per the requested format.
pub fn output_json<T: Serialize>(data: &T, format: OutputFormat) -> anyhow::Result<()> {
    let json = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(data)?,
        _ => serde_json::to_string(data)?,
    };
    println!("{}", json);
    Ok(())
}

/// One node in a serialized graph listing
#[derive(Debug, Serialize)]
pub struct NodeEntry {
    pub name: String,
    pub granularity: Granularity,
    pub confirmed: bool,
}

/// One dependency edge in a serialized graph listing
#[derive(Debug, Serialize)]
pub struct EdgeEntry {
    pub from: String,
    pub to: String,
}

/// Response for the `graph` command
#[derive(Debug, Serialize)]
pub struct GraphResponse {
    pub scope: Granularity,
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: Vec<NodeEntry>,
    pub edges: Vec<EdgeEntry>,
    pub diagnostics: usize,
}

/// Response for the `cycles` command
#[derive(Debug, Serialize)]
pub struct CyclesResponse {
    pub scope: Granularity,
    pub cycle_count: usize,
    /// Each cycle as its node names in path order
    pub cycles: Vec<Vec<String>>,
    pub diagnostics: usize,
}

/// Response for the `closure` command
#[derive(Debug, Serialize)]
pub struct ClosureResponse {
    pub operation: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub edges: Vec<EdgeEntry>,
    pub diagnostics: usize,
}

/// Response for the `metrics` command
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub report: MetricsReport,
    pub diagnostics: usize,
}

/// Error response for failed operations
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Snapshot a factory's selected-granularity nodes and edges in name order.
///
/// Nodes come from the factory's name index, so listings are deterministic.
/// Edges are emitted per source node in insertion order.
pub fn snapshot_graph(factory: &NodeFactory, scope: Granularity, diagnostics: usize) -> GraphResponse {
    let index: Vec<NodeId> = match scope {
        Granularity::Package => factory.packages().values().copied().collect(),
        Granularity::Class => factory.classes().values().copied().collect(),
        Granularity::Feature => factory.features().values().copied().collect(),
    };

    let mut nodes = Vec::with_capacity(index.len());
    let mut edges = Vec::new();
    for &id in &index {
        let node = factory.node(id);
        nodes.push(NodeEntry {
            name: node.name.clone(),
            granularity: node.granularity(),
            confirmed: node.confirmed,
        });
        for &to in &node.outbound {
            edges.push(EdgeEntry {
                from: node.name.clone(),
                to: factory.node(to).name.clone(),
            });
        }
    }

    GraphResponse {
        scope,
        node_count: nodes.len(),
        edge_count: edges.len(),
        nodes,
        edges,
        diagnostics,
    }
}
