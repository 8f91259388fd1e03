//! Transitive closure and reduction of dependency links.
//!
//! Both operations mutate the factory in place and are idempotent.
//! Maximizing makes every indirect dependency explicit; minimizing removes
//! every edge already implied by some other path. They are not inverses:
//! minimize-after-maximize only restores the original graph when the
//! original was already reduced.

use ahash::AHashSet;

use super::factory::NodeFactory;
use super::node::NodeId;

/// Add a direct edge for every reachable node.
///
/// A node on a cycle reaches itself, so closure introduces self edges for
/// cycle members. Reachability is computed against the edges present on
/// entry; added edges change nothing it would find.
pub fn maximize_links(factory: &mut NodeFactory) {
    let snapshot: Vec<(NodeId, Vec<NodeId>)> = factory
        .nodes()
        .map(|node| (node.id, node.outbound.clone()))
        .collect();

    for &(from, ref direct) in &snapshot {
        // Discovery order over insertion-ordered edge lists keeps the new
        // edges in a deterministic order.
        let mut reached: Vec<NodeId> = Vec::new();
        let mut seen: AHashSet<NodeId> = AHashSet::new();
        let mut stack: Vec<NodeId> = direct.clone();
        stack.reverse();
        while let Some(node) = stack.pop() {
            if !seen.insert(node) {
                continue;
            }
            reached.push(node);
            for &next in snapshot[node.index()].1.iter().rev() {
                if !seen.contains(&next) {
                    stack.push(next);
                }
            }
        }
        for to in reached {
            factory.add_dependency(from, to);
        }
    }
}

/// Remove every edge whose target stays reachable without it.
///
/// Edges are tested one at a time in deterministic order (nodes by id,
/// targets by insertion order): the edge is removed, reachability is
/// re-tested against the now-current graph, and the edge is restored if the
/// target became unreachable. Testing against the live graph rather than a
/// snapshot is what keeps cycles from losing too many edges.
pub fn minimize_links(factory: &mut NodeFactory) {
    let node_ids: Vec<NodeId> = factory.nodes().map(|node| node.id).collect();
    for from in node_ids {
        let targets = factory.node(from).outbound.clone();
        for to in targets {
            factory.remove_dependency(from, to);
            if !reaches(factory, from, to) {
                factory.add_dependency(from, to);
            }
        }
    }
}

fn reaches(factory: &NodeFactory, from: NodeId, to: NodeId) -> bool {
    let mut seen: AHashSet<NodeId> = AHashSet::new();
    let mut stack: Vec<NodeId> = factory.node(from).outbound.clone();
    while let Some(node) = stack.pop() {
        if node == to {
            return true;
        }
        if !seen.insert(node) {
            continue;
        }
        stack.extend(factory.node(node).outbound.iter().copied());
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(factory: &mut NodeFactory) -> (NodeId, NodeId, NodeId) {
        let a = factory.create_package("a", true);
        let b = factory.create_package("b", true);
        let c = factory.create_package("c", true);
        factory.add_dependency(a, b);
        factory.add_dependency(b, c);
        (a, b, c)
    }

    #[test]
    fn maximize_adds_transitive_edge() {
        let mut factory = NodeFactory::new();
        let (a, b, c) = chain(&mut factory);
        maximize_links(&mut factory);
        assert_eq!(factory.node(a).outbound, vec![b, c]);
        assert_eq!(factory.node(c).inbound, vec![b, a]);
    }

    #[test]
    fn maximize_gives_cycle_members_self_edges() {
        let mut factory = NodeFactory::new();
        let a = factory.create_package("a", true);
        let b = factory.create_package("b", true);
        factory.add_dependency(a, b);
        factory.add_dependency(b, a);
        maximize_links(&mut factory);
        assert!(factory.node(a).outbound.contains(&a));
        assert!(factory.node(b).outbound.contains(&b));
    }

    #[test]
    fn maximize_is_idempotent() {
        let mut factory = NodeFactory::new();
        let (a, _, _) = chain(&mut factory);
        maximize_links(&mut factory);
        let once = factory.node(a).outbound.clone();
        maximize_links(&mut factory);
        assert_eq!(factory.node(a).outbound, once);
    }

    #[test]
    fn minimize_removes_implied_edge() {
        let mut factory = NodeFactory::new();
        let (a, b, c) = chain(&mut factory);
        factory.add_dependency(a, c);
        minimize_links(&mut factory);
        assert_eq!(factory.node(a).outbound, vec![b]);
        assert_eq!(factory.node(c).inbound, vec![b]);
    }

    #[test]
    fn minimize_keeps_a_cycle_connected() {
        // a -> b, a -> c, b -> a, c -> a: removing both of a's edges at
        // once would disconnect the graph; one of them must survive.
        let mut factory = NodeFactory::new();
        let a = factory.create_package("a", true);
        let b = factory.create_package("b", true);
        let c = factory.create_package("c", true);
        factory.add_dependency(a, b);
        factory.add_dependency(a, c);
        factory.add_dependency(b, a);
        factory.add_dependency(c, a);
        minimize_links(&mut factory);
        for &(from, to) in &[(a, b), (a, c), (b, a), (c, a)] {
            if factory.node(from).outbound.contains(&to) {
                continue;
            }
            assert!(reaches(&factory, from, to));
        }
    }

    #[test]
    fn minimize_after_maximize_restores_a_reduced_chain() {
        let mut factory = NodeFactory::new();
        let (a, b, c) = chain(&mut factory);
        maximize_links(&mut factory);
        minimize_links(&mut factory);
        assert_eq!(factory.node(a).outbound, vec![b]);
        assert_eq!(factory.node(b).outbound, vec![c]);
    }
}
