//! Dependency graph engine.
//!
//! A [`factory::NodeFactory`] owns one graph of package, class and feature
//! nodes. The [`collector`] populates it from parsed classfiles, and the
//! algorithm modules ([`cycles`], [`summarize`], [`closure`]) query or
//! restructure it, scoped by [`criteria`].

pub mod closure;
pub mod collector;
pub mod criteria;
pub mod cycles;
pub mod factory;
pub mod node;
pub mod summarize;

pub use closure::{maximize_links, minimize_links};
pub use collector::CodeDependencyCollector;
pub use criteria::{
    CollectionCriteria, ComprehensiveCriteria, CriteriaError, RegularExpressionCriteria,
    SelectionCriteria,
};
pub use cycles::{Cycle, CycleDetector};
pub use factory::NodeFactory;
pub use node::{Granularity, Node, NodeId, NodeKind};
pub use summarize::GraphSummarizer;
