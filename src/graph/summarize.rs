//! Graph summarization across granularities.
//!
//! Re-projects a detailed graph (typically feature-level, as the collector
//! builds it) onto a coarser granularity in a fresh factory. The input is
//! never mutated; both graphs stay usable side by side.

use super::criteria::SelectionCriteria;
use super::factory::NodeFactory;
use super::node::{Granularity, NodeId, NodeKind};

/// Projects selected nodes and edges onto a target granularity.
pub struct GraphSummarizer<'a> {
    granularity: Granularity,
    criteria: &'a dyn SelectionCriteria,
}

impl<'a> GraphSummarizer<'a> {
    pub fn new(granularity: Granularity, criteria: &'a dyn SelectionCriteria) -> Self {
        Self {
            granularity,
            criteria,
        }
    }

    /// Build the summarized graph.
    ///
    /// Every selected node appears (projected); every edge between two
    /// selected nodes is re-recorded between the projections, with
    /// duplicates collapsing in the factory. An edge whose endpoints project
    /// to the same node becomes a self edge, which consumers may filter.
    pub fn summarize(&self, input: &NodeFactory) -> NodeFactory {
        let mut output = NodeFactory::new();

        for node in input.nodes() {
            if self.selected(input, node.id) {
                self.materialize(input, &mut output, self.coarsen(input, node.id));
            }
        }

        for node in input.nodes() {
            if !self.selected(input, node.id) {
                continue;
            }
            for &to in &node.outbound {
                if !self.selected(input, to) {
                    continue;
                }
                let from_out = self.materialize(input, &mut output, self.coarsen(input, node.id));
                let to_out = self.materialize(input, &mut output, self.coarsen(input, to));
                output.add_dependency(from_out, to_out);
            }
        }

        output
    }

    fn selected(&self, input: &NodeFactory, id: NodeId) -> bool {
        let node = input.node(id);
        match node.granularity() {
            Granularity::Package => self.criteria.matches_package_name(&node.name),
            Granularity::Class => self.criteria.matches_class_name(&node.name),
            Granularity::Feature => self.criteria.matches_feature_name(&node.name),
        }
    }

    /// Walk containment upward until the node is at or above the target
    /// granularity. Nodes already coarse enough stay themselves.
    fn coarsen(&self, input: &NodeFactory, mut id: NodeId) -> NodeId {
        loop {
            match &input.node(id).kind {
                NodeKind::Feature { class } if self.granularity < Granularity::Feature => {
                    id = *class;
                }
                NodeKind::Class { package, .. } if self.granularity < Granularity::Class => {
                    id = *package;
                }
                _ => return id,
            }
        }
    }

    /// Intern the projection of an input node into the output factory,
    /// carrying its confirmed flag.
    fn materialize(&self, input: &NodeFactory, output: &mut NodeFactory, id: NodeId) -> NodeId {
        let node = input.node(id);
        match node.granularity() {
            Granularity::Package => output.create_package(&node.name, node.confirmed),
            Granularity::Class => output.create_class(&node.name, node.confirmed),
            Granularity::Feature => output.create_feature(&node.name, node.confirmed),
        }
    }
}
