//! Sextant: a deterministic Java bytecode dependency analyzer
//!
//! Sextant decodes JVM classfiles, extracts the dependencies their bytecode
//! declares, and builds an in-memory graph of packages, classes and features
//! (fields and methods) for cycle detection, summarization and transitive
//! closure analysis.
//!
//! # Determinism
//!
//! The same inputs always produce the same output:
//! - Directory entries are loaded in sorted order; archive entries in
//!   archive order.
//! - Node name indexes are ordered maps, so listings come out in name order.
//! - Edge lists preserve insertion order and traversals never depend on
//!   hash-map iteration.
//!
//! # Pipeline
//!
//! ```text
//! .class / .jar / dir
//!       |  loader::ClassfileLoader        (walkdir + zip, rayon parse)
//!       v
//! classfile::Classfile                    (decoded model)
//!       |  graph::CodeDependencyCollector (criteria-filtered)
//!       v
//! graph::NodeFactory                      (one factory = one graph)
//!       |  cycles / summarize / closure
//!       v
//! output::JsonResponse / human text
//! ```

pub mod classfile;
pub mod diagnostics;
pub mod graph;
pub mod loader;
pub mod output;
pub mod version;

pub use classfile::{parse, Classfile};
pub use graph::{
    CodeDependencyCollector, ComprehensiveCriteria, CycleDetector, Granularity, GraphSummarizer,
    NodeFactory, RegularExpressionCriteria, SelectionCriteria,
};
pub use loader::{ClassfileLoader, LoadEvent, LoadListener};
pub use output::OutputFormat;
