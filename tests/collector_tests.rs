//! Integration tests for dependency collection from classfiles.

mod common;

use common::{classfile_bytes, code_attribute, member_info, PoolBuilder};
use sextant::classfile;
use sextant::graph::{
    CodeDependencyCollector, ComprehensiveCriteria, NodeFactory, RegularExpressionCriteria,
};

fn collect(bytes: &[u8]) -> NodeFactory {
    let classfile = classfile::parse(bytes).unwrap();
    let mut factory = NodeFactory::new();
    CodeDependencyCollector::new(&mut factory, &ComprehensiveCriteria)
        .collect(&classfile)
        .unwrap();
    factory
}

fn outbound_names(factory: &NodeFactory, from: &str) -> Vec<String> {
    let id = factory
        .features()
        .get(from)
        .or_else(|| factory.classes().get(from))
        .copied()
        .unwrap_or_else(|| panic!("no node named {from}"));
    factory
        .node(id)
        .outbound
        .iter()
        .map(|&to| factory.node(to).name.clone())
        .collect()
}

#[test]
fn superclass_and_interfaces_become_dependencies_and_parents() {
    let mut pool = PoolBuilder::new();
    let this_class = pool.class("com/example/Foo");
    let super_class = pool.class("com/example/Base");
    let interface = pool.class("java/io/Serializable");
    let bytes = classfile_bytes(pool, 0x0021, this_class, super_class, &[interface], &[], &[]);

    let factory = collect(&bytes);
    assert_eq!(
        outbound_names(&factory, "com.example.Foo"),
        vec!["com.example.Base", "java.io.Serializable"]
    );
    // Declared class is confirmed; referenced ones are not.
    assert!(factory.node(factory.classes()["com.example.Foo"]).confirmed);
    assert!(!factory.node(factory.classes()["com.example.Base"]).confirmed);
}

#[test]
fn field_descriptor_classes_become_feature_dependencies() {
    let mut pool = PoolBuilder::new();
    let this_class = pool.class("com/example/Foo");
    let super_class = pool.class("java/lang/Object");
    let name = pool.utf8("names");
    let desc = pool.utf8("[Ljava/lang/String;");
    let field = member_info(0x0002, name, desc, &[]);
    let bytes = classfile_bytes(pool, 0x0021, this_class, super_class, &[], &[field], &[]);

    let factory = collect(&bytes);
    assert_eq!(
        outbound_names(&factory, "com.example.Foo.names"),
        vec!["java.lang.String"]
    );
}

#[test]
fn invocations_become_feature_edges_and_new_is_skipped() {
    let mut pool = PoolBuilder::new();
    let this_class = pool.class("com/example/Foo");
    let super_class = pool.class("java/lang/Object");

    let target_class = pool.class("com/example/Helper");
    let ctor_ref = pool.method_ref("com/example/Helper", "<init>", "()V");
    let method_ref = pool.method_ref("com/example/Helper", "run", "(I)V");
    let field_ref = pool.field_ref("com/example/Helper", "count", "I");

    // new Helper; dup; invokespecial <init>; invokevirtual run; getfield count
    let mut code = Vec::new();
    code.extend_from_slice(&[0xbb]);
    code.extend_from_slice(&target_class.to_be_bytes());
    code.push(0x59); // dup
    code.push(0xb7);
    code.extend_from_slice(&ctor_ref.to_be_bytes());
    code.push(0xb6);
    code.extend_from_slice(&method_ref.to_be_bytes());
    code.push(0xb4);
    code.extend_from_slice(&field_ref.to_be_bytes());
    code.push(0xb1); // return

    let name = pool.utf8("go");
    let desc = pool.utf8("()V");
    let attribute = code_attribute(&mut pool, &code);
    let method = member_info(0x0001, name, desc, &[attribute]);
    let bytes = classfile_bytes(pool, 0x0021, this_class, super_class, &[], &[], &[method]);

    let factory = collect(&bytes);
    let deps = outbound_names(&factory, "com.example.Foo.go()");
    // The `new` opcode itself contributes nothing; the constructor call is
    // the edge, named with the simple class name.
    assert_eq!(
        deps,
        vec![
            "com.example.Helper.Helper()",
            "com.example.Helper.run(int)",
            "com.example.Helper.count",
        ]
    );
}

#[test]
fn clinit_references_are_skipped() {
    let mut pool = PoolBuilder::new();
    let this_class = pool.class("com/example/Foo");
    let super_class = pool.class("java/lang/Object");
    let clinit_ref = pool.method_ref("com/example/Helper", "<clinit>", "()V");

    let mut code = vec![0xb8];
    code.extend_from_slice(&clinit_ref.to_be_bytes());
    code.push(0xb1);

    let name = pool.utf8("go");
    let desc = pool.utf8("()V");
    let attribute = code_attribute(&mut pool, &code);
    let method = member_info(0x0001, name, desc, &[attribute]);
    let bytes = classfile_bytes(pool, 0x0021, this_class, super_class, &[], &[], &[method]);

    let factory = collect(&bytes);
    assert!(outbound_names(&factory, "com.example.Foo.go()").is_empty());
}

#[test]
fn array_class_references_contribute_component_classes() {
    let mut pool = PoolBuilder::new();
    let this_class = pool.class("com/example/Foo");
    let super_class = pool.class("java/lang/Object");
    let array_class = pool.class("[Lcom/example/Item;");

    let mut code = vec![0xc0]; // checkcast
    code.extend_from_slice(&array_class.to_be_bytes());
    code.push(0xb1);

    let name = pool.utf8("go");
    let desc = pool.utf8("()V");
    let attribute = code_attribute(&mut pool, &code);
    let method = member_info(0x0001, name, desc, &[attribute]);
    let bytes = classfile_bytes(pool, 0x0021, this_class, super_class, &[], &[], &[method]);

    let factory = collect(&bytes);
    assert_eq!(
        outbound_names(&factory, "com.example.Foo.go()"),
        vec!["com.example.Item"]
    );
}

#[test]
fn excluded_targets_are_never_interned() {
    let mut pool = PoolBuilder::new();
    let this_class = pool.class("com/example/Foo");
    let super_class = pool.class("java/lang/Object");
    let bytes = classfile_bytes(pool, 0x0021, this_class, super_class, &[], &[], &[]);
    let classfile = classfile::parse(&bytes).unwrap();

    let mut criteria = RegularExpressionCriteria::new();
    criteria
        .set_global_excludes(&[r"/^java\./".to_string()])
        .unwrap();

    let mut factory = NodeFactory::new();
    CodeDependencyCollector::new(&mut factory, &criteria)
        .collect(&classfile)
        .unwrap();

    assert!(factory.classes().contains_key("com.example.Foo"));
    assert!(!factory.classes().contains_key("java.lang.Object"));
}

#[test]
fn declared_entities_confirm_previously_inferred_nodes() {
    // Foo references Base; loading Base afterwards promotes it.
    let mut pool = PoolBuilder::new();
    let this_class = pool.class("com/example/Foo");
    let super_class = pool.class("com/example/Base");
    let foo = classfile_bytes(pool, 0x0021, this_class, super_class, &[], &[], &[]);

    let mut pool = PoolBuilder::new();
    let this_class = pool.class("com/example/Base");
    let super_class = pool.class("java/lang/Object");
    let base = classfile_bytes(pool, 0x0021, this_class, super_class, &[], &[], &[]);

    let mut factory = NodeFactory::new();
    CodeDependencyCollector::new(&mut factory, &ComprehensiveCriteria)
        .collect(&classfile::parse(&foo).unwrap())
        .unwrap();
    let base_id = factory.classes()["com.example.Base"];
    assert!(!factory.node(base_id).confirmed);

    CodeDependencyCollector::new(&mut factory, &ComprehensiveCriteria)
        .collect(&classfile::parse(&base).unwrap())
        .unwrap();
    assert!(factory.node(base_id).confirmed);
}
