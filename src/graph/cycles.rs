//! Dependency cycle detection.
//!
//! Depth-first search over the criteria-selected subgraph. A back edge to a
//! node on the current path yields the cycle formed by the sub-path from
//! that node's first occurrence; nodes fully explored once are never
//! re-explored from another start, so the whole search is O(V + E) with the
//! path membership tests O(1).
//!
//! Determinism: start nodes iterate packages, then classes, then features,
//! each in name order, and neighbors in edge insertion order. The same input
//! always reports the same cycles in the same order.

use ahash::AHashSet;

use super::criteria::SelectionCriteria;
use super::factory::NodeFactory;
use super::node::{Granularity, Node, NodeId};

/// One elementary cycle: the nodes in path order, first node being the
/// earliest-discovered member. A self-loop is a path of length 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub path: Vec<NodeId>,
}

impl Cycle {
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Finds elementary dependency cycles among criteria-selected nodes.
pub struct CycleDetector<'a> {
    criteria: &'a dyn SelectionCriteria,
    max_cycle_length: Option<usize>,
}

fn selected(criteria: &dyn SelectionCriteria, node: &Node) -> bool {
    match node.granularity() {
        Granularity::Package => criteria.matches_package_name(&node.name),
        Granularity::Class => criteria.matches_class_name(&node.name),
        Granularity::Feature => criteria.matches_feature_name(&node.name),
    }
}

impl<'a> CycleDetector<'a> {
    pub fn new(criteria: &'a dyn SelectionCriteria) -> Self {
        Self {
            criteria,
            max_cycle_length: None,
        }
    }

    /// Only report cycles of at most `length` nodes.
    pub fn with_max_cycle_length(mut self, length: usize) -> Self {
        self.max_cycle_length = Some(length);
        self
    }

    pub fn find_cycles(&self, factory: &NodeFactory) -> Vec<Cycle> {
        let mut search = Search {
            factory,
            criteria: self.criteria,
            max_cycle_length: self.max_cycle_length,
            path: Vec::new(),
            on_path: AHashSet::new(),
            visited: AHashSet::new(),
            cycles: Vec::new(),
        };

        let starts = factory
            .packages()
            .values()
            .chain(factory.classes().values())
            .chain(factory.features().values());
        for &start in starts {
            if selected(self.criteria, factory.node(start)) {
                search.visit(start);
            }
        }
        search.cycles
    }
}

struct Search<'a> {
    factory: &'a NodeFactory,
    criteria: &'a dyn SelectionCriteria,
    max_cycle_length: Option<usize>,
    path: Vec<NodeId>,
    on_path: AHashSet<NodeId>,
    visited: AHashSet<NodeId>,
    cycles: Vec<Cycle>,
}

impl Search<'_> {
    fn visit(&mut self, node: NodeId) {
        if self.visited.contains(&node) {
            return;
        }
        self.path.push(node);
        self.on_path.insert(node);

        for &next in &self.factory.node(node).outbound {
            if !selected(self.criteria, self.factory.node(next)) {
                continue;
            }
            if self.on_path.contains(&next) {
                self.record(next);
            } else {
                self.visit(next);
            }
        }

        self.path.pop();
        self.on_path.remove(&node);
        // Post-order marking: every cycle through this node has been seen.
        self.visited.insert(node);
    }

    fn record(&mut self, back_to: NodeId) {
        let first = self
            .path
            .iter()
            .position(|&id| id == back_to)
            .unwrap_or(0);
        let path = self.path[first..].to_vec();
        if let Some(max) = self.max_cycle_length {
            if path.len() > max {
                return;
            }
        }
        self.cycles.push(Cycle { path });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::criteria::ComprehensiveCriteria;

    fn names(factory: &NodeFactory, cycle: &Cycle) -> Vec<String> {
        cycle
            .path
            .iter()
            .map(|&id| factory.node(id).name.clone())
            .collect()
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        let mut factory = NodeFactory::new();
        let a = factory.create_package("a", true);
        let b = factory.create_package("b", true);
        factory.add_dependency(a, b);
        let cycles = CycleDetector::new(&ComprehensiveCriteria).find_cycles(&factory);
        assert!(cycles.is_empty());
    }

    #[test]
    fn two_cycle_is_reported_once() {
        let mut factory = NodeFactory::new();
        let a = factory.create_package("a", true);
        let b = factory.create_package("b", true);
        factory.add_dependency(a, b);
        factory.add_dependency(b, a);
        let cycles = CycleDetector::new(&ComprehensiveCriteria).find_cycles(&factory);
        assert_eq!(cycles.len(), 1);
        assert_eq!(names(&factory, &cycles[0]), vec!["a", "b"]);
    }

    #[test]
    fn self_loop_is_a_length_one_cycle() {
        let mut factory = NodeFactory::new();
        let a = factory.create_package("a", true);
        factory.add_dependency(a, a);
        let cycles = CycleDetector::new(&ComprehensiveCriteria).find_cycles(&factory);
        assert_eq!(cycles.len(), 1);
        assert_eq!(names(&factory, &cycles[0]), vec!["a"]);
    }

    #[test]
    fn overlapping_cycles_are_both_found() {
        // a -> b -> c -> a and c -> d -> e -> c share node c.
        let mut factory = NodeFactory::new();
        let a = factory.create_package("a", true);
        let b = factory.create_package("b", true);
        let c = factory.create_package("c", true);
        let d = factory.create_package("d", true);
        let e = factory.create_package("e", true);
        factory.add_dependency(a, b);
        factory.add_dependency(b, c);
        factory.add_dependency(c, a);
        factory.add_dependency(c, d);
        factory.add_dependency(d, e);
        factory.add_dependency(e, c);
        let cycles = CycleDetector::new(&ComprehensiveCriteria).find_cycles(&factory);
        let mut found: Vec<Vec<String>> =
            cycles.iter().map(|cycle| names(&factory, cycle)).collect();
        found.sort();
        assert_eq!(found, vec![vec!["a", "b", "c"], vec!["c", "d", "e"]]);
    }

    #[test]
    fn max_length_filters_long_cycles() {
        let mut factory = NodeFactory::new();
        let a = factory.create_package("a", true);
        let b = factory.create_package("b", true);
        let c = factory.create_package("c", true);
        factory.add_dependency(a, b);
        factory.add_dependency(b, c);
        factory.add_dependency(c, a);
        let cycles = CycleDetector::new(&ComprehensiveCriteria)
            .with_max_cycle_length(2)
            .find_cycles(&factory);
        assert!(cycles.is_empty());
    }
}
