//! Node interning and graph construction.
//!
//! One factory owns one graph. All node creation is find-or-create by name,
//! so every distinct name maps to exactly one node and edges can never
//! dangle. Name indexes are `BTreeMap`s: every user-visible traversal of
//! "all packages" or "all classes" comes out in name order.

use std::collections::BTreeMap;

use super::node::{push_unique, Node, NodeId, NodeKind};

/// Owns the node arena and the per-granularity name indexes.
#[derive(Debug, Default)]
pub struct NodeFactory {
    nodes: Vec<Node>,
    packages: BTreeMap<String, NodeId>,
    classes: BTreeMap<String, NodeId>,
    features: BTreeMap<String, NodeId>,
}

/// Package part of a class name; empty for the default package.
pub fn package_name_of(class_name: &str) -> &str {
    match class_name.rfind('.') {
        Some(pos) => &class_name[..pos],
        None => "",
    }
}

/// Class part of a feature name.
///
/// The split point is the last dot before the parameter list if the feature
/// is a method, otherwise the last dot: `a.b.C.m(x.Y)` splits at `a.b.C`,
/// `a.b.C.field` likewise.
pub fn class_name_of(feature_name: &str) -> &str {
    let head = match feature_name.find('(') {
        Some(paren) => &feature_name[..paren],
        None => feature_name,
    };
    match head.rfind('.') {
        Some(pos) => &feature_name[..pos],
        None => "",
    }
}

impl NodeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Packages in name order.
    pub fn packages(&self) -> &BTreeMap<String, NodeId> {
        &self.packages
    }

    /// Classes in name order.
    pub fn classes(&self) -> &BTreeMap<String, NodeId> {
        &self.classes
    }

    /// Features in name order.
    pub fn features(&self) -> &BTreeMap<String, NodeId> {
        &self.features
    }

    fn alloc(&mut self, name: &str, kind: NodeKind, confirmed: bool) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            name: name.to_string(),
            kind,
            confirmed,
            inbound: Vec::new(),
            outbound: Vec::new(),
        });
        id
    }

    /// Find or create the package node for `name`.
    ///
    /// `confirmed` promotes an existing unconfirmed node but never demotes a
    /// confirmed one.
    pub fn create_package(&mut self, name: &str, confirmed: bool) -> NodeId {
        if let Some(&id) = self.packages.get(name) {
            if confirmed {
                self.node_mut(id).confirmed = true;
            }
            return id;
        }
        let id = self.alloc(name, NodeKind::Package { classes: Vec::new() }, confirmed);
        self.packages.insert(name.to_string(), id);
        id
    }

    /// Find or create the class node for `name`, creating its package as
    /// needed. The implicit package inherits `confirmed`.
    pub fn create_class(&mut self, name: &str, confirmed: bool) -> NodeId {
        if let Some(&id) = self.classes.get(name) {
            if confirmed {
                self.node_mut(id).confirmed = true;
                let package = match self.node(id).kind {
                    NodeKind::Class { package, .. } => package,
                    _ => unreachable!("class index points at a class node"),
                };
                self.node_mut(package).confirmed = true;
            }
            return id;
        }
        let package = self.create_package(package_name_of(name), confirmed);
        let id = self.alloc(
            name,
            NodeKind::Class {
                package,
                features: Vec::new(),
                parents: Vec::new(),
            },
            confirmed,
        );
        self.classes.insert(name.to_string(), id);
        match &mut self.node_mut(package).kind {
            NodeKind::Package { classes } => push_unique(classes, id),
            _ => unreachable!("package index points at a package node"),
        }
        id
    }

    /// Find or create the feature node for `name`, creating its class (and
    /// transitively its package) as needed.
    pub fn create_feature(&mut self, name: &str, confirmed: bool) -> NodeId {
        if let Some(&id) = self.features.get(name) {
            if confirmed {
                self.node_mut(id).confirmed = true;
                let class = match self.node(id).kind {
                    NodeKind::Feature { class } => class,
                    _ => unreachable!("feature index points at a feature node"),
                };
                // Re-entering create_class promotes the package as well.
                let class_name = self.node(class).name.clone();
                self.create_class(&class_name, true);
            }
            return id;
        }
        let class = self.create_class(class_name_of(name), confirmed);
        let id = self.alloc(name, NodeKind::Feature { class }, confirmed);
        self.features.insert(name.to_string(), id);
        match &mut self.node_mut(class).kind {
            NodeKind::Class { features, .. } => push_unique(features, id),
            _ => unreachable!("class index points at a class node"),
        }
        id
    }

    /// Record `from` depends-on `to`; both directions are kept consistent as
    /// one operation. Duplicate and self edges are legal; duplicates are
    /// dropped, self edges are recorded.
    pub fn add_dependency(&mut self, from: NodeId, to: NodeId) {
        push_unique(&mut self.node_mut(from).outbound, to);
        push_unique(&mut self.node_mut(to).inbound, from);
    }

    /// Remove the `from` → `to` edge if present, in both directions.
    pub fn remove_dependency(&mut self, from: NodeId, to: NodeId) {
        self.node_mut(from).outbound.retain(|&id| id != to);
        self.node_mut(to).inbound.retain(|&id| id != from);
    }

    /// Record an inheritance link from a class to its superclass or an
    /// implemented interface. No-op for non-class nodes.
    pub fn add_parent(&mut self, class: NodeId, parent: NodeId) {
        if let NodeKind::Class { parents, .. } = &mut self.node_mut(class).kind {
            push_unique(parents, parent);
        }
    }
}
