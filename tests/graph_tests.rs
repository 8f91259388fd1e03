//! Integration tests for the node factory and graph model.

use sextant::graph::{NodeFactory, NodeKind};

#[test]
fn create_class_is_idempotent_interning() {
    let mut factory = NodeFactory::new();
    let first = factory.create_class("com.example.Foo", true);
    let second = factory.create_class("com.example.Foo", false);
    assert_eq!(first, second);
    // Package was created implicitly, so: package + class.
    assert_eq!(factory.len(), 2);
}

#[test]
fn creating_a_feature_creates_class_and_package() {
    let mut factory = NodeFactory::new();
    let feature = factory.create_feature("com.example.Foo.bar(java.lang.String)", true);

    let class = factory.classes()["com.example.Foo"];
    let package = factory.packages()["com.example"];

    match &factory.node(feature).kind {
        NodeKind::Feature { class: parent } => assert_eq!(*parent, class),
        other => panic!("expected feature node, got {other:?}"),
    }
    match &factory.node(class).kind {
        NodeKind::Class {
            package: parent,
            features,
            ..
        } => {
            assert_eq!(*parent, package);
            assert_eq!(features, &vec![feature]);
        }
        other => panic!("expected class node, got {other:?}"),
    }
    assert!(factory.node(package).confirmed);
}

#[test]
fn plain_field_feature_splits_at_last_dot() {
    let mut factory = NodeFactory::new();
    factory.create_feature("com.example.Foo.count", true);
    assert!(factory.classes().contains_key("com.example.Foo"));
    assert!(factory.packages().contains_key("com.example"));
}

#[test]
fn class_without_package_lands_in_root_package() {
    let mut factory = NodeFactory::new();
    factory.create_class("Foo", false);
    assert!(factory.packages().contains_key(""));
}

#[test]
fn confirmed_promotes_but_never_demotes() {
    let mut factory = NodeFactory::new();
    let class = factory.create_class("com.example.Foo", false);
    assert!(!factory.node(class).confirmed);

    factory.create_class("com.example.Foo", true);
    assert!(factory.node(class).confirmed);

    // A later unconfirmed sighting does not demote.
    factory.create_class("com.example.Foo", false);
    assert!(factory.node(class).confirmed);

    // Promotion propagates to the implicit package.
    let package = factory.packages()["com.example"];
    assert!(factory.node(package).confirmed);
}

#[test]
fn add_dependency_is_symmetric_and_deduped() {
    let mut factory = NodeFactory::new();
    let a = factory.create_class("a.A", true);
    let b = factory.create_class("b.B", true);

    factory.add_dependency(a, b);
    factory.add_dependency(a, b);

    assert_eq!(factory.node(a).outbound, vec![b]);
    assert_eq!(factory.node(b).inbound, vec![a]);

    factory.remove_dependency(a, b);
    assert!(factory.node(a).outbound.is_empty());
    assert!(factory.node(b).inbound.is_empty());
}

#[test]
fn self_edges_are_recorded() {
    let mut factory = NodeFactory::new();
    let a = factory.create_class("a.A", true);
    factory.add_dependency(a, a);
    assert_eq!(factory.node(a).outbound, vec![a]);
    assert_eq!(factory.node(a).inbound, vec![a]);
}

#[test]
fn name_indexes_iterate_in_name_order() {
    let mut factory = NodeFactory::new();
    factory.create_package("zebra", true);
    factory.create_package("alpha", true);
    factory.create_package("middle", true);
    let names: Vec<&str> = factory.packages().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["alpha", "middle", "zebra"]);
}

#[test]
fn edge_lists_preserve_insertion_order() {
    let mut factory = NodeFactory::new();
    let a = factory.create_package("a", true);
    let z = factory.create_package("z", true);
    let b = factory.create_package("b", true);
    factory.add_dependency(a, z);
    factory.add_dependency(a, b);
    assert_eq!(factory.node(a).outbound, vec![z, b]);
}
