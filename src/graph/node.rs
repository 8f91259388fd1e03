//! Dependency graph node model.
//!
//! Nodes live in an arena owned by the factory and reference each other by
//! [`NodeId`] index, never by pointer. Dependency graphs are cyclic by
//! nature, so owning references are off the table; indices also keep nodes
//! `Send` for free.

use serde::Serialize;

/// Index of a node within its factory's arena.
///
/// Ids are only meaningful within the factory that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Granularity level of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Package,
    Class,
    Feature,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Package => "package",
            Granularity::Class => "class",
            Granularity::Feature => "feature",
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "package" => Ok(Granularity::Package),
            "class" => Ok(Granularity::Class),
            "feature" => Ok(Granularity::Feature),
            other => Err(format!(
                "invalid scope '{other}' (expected package, class or feature)"
            )),
        }
    }
}

/// Kind-specific structure of a node.
///
/// Containment links (`classes`, `features`, `package`, `class`) and
/// inheritance links (`parents`) are separate from the dependency edges on
/// [`Node`]; traversals choose which relation to follow.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Package {
        classes: Vec<NodeId>,
    },
    Class {
        package: NodeId,
        features: Vec<NodeId>,
        /// Superclass and implemented interfaces.
        parents: Vec<NodeId>,
    },
    Feature {
        class: NodeId,
    },
}

impl NodeKind {
    pub fn granularity(&self) -> Granularity {
        match self {
            NodeKind::Package { .. } => Granularity::Package,
            NodeKind::Class { .. } => Granularity::Class,
            NodeKind::Feature { .. } => Granularity::Feature,
        }
    }
}

/// One node in the graph.
///
/// `confirmed` distinguishes entities whose definition was actually loaded
/// from entities known only as reference targets. Edge vectors preserve
/// insertion order and never hold duplicates.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub confirmed: bool,
    pub inbound: Vec<NodeId>,
    pub outbound: Vec<NodeId>,
}

impl Node {
    pub fn granularity(&self) -> Granularity {
        self.kind.granularity()
    }
}

/// Append `id` unless already present, preserving first-insertion order.
pub(crate) fn push_unique(edges: &mut Vec<NodeId>, id: NodeId) {
    if !edges.contains(&id) {
        edges.push(id);
    }
}
