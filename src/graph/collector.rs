//! Dependency extraction from parsed classfiles.
//!
//! Walks one classfile at a time and turns every symbolic reference it can
//! see (superclass, interfaces, descriptors, throws clauses, exception
//! handlers, constant-pool operands of the bytecode) into graph edges.
//! Declared entities become confirmed nodes; referenced entities are created
//! unconfirmed and confirmed later if their classfile shows up.

use crate::classfile::constant_pool::{ConstantPoolEntry, MemberKind};
use crate::classfile::descriptor;
use crate::classfile::error::ClassfileError;
use crate::classfile::instruction::opcode;
use crate::classfile::{Classfile, Field, Method};

use super::criteria::SelectionCriteria;
use super::factory::NodeFactory;
use super::node::NodeId;

/// Builds graph edges from classfiles into a borrowed factory.
///
/// Filtering happens here, at collection time: a dependency target that the
/// criteria rejects is never interned at all, which is what bounds memory
/// when analyzing code that leans on large libraries.
pub struct CodeDependencyCollector<'a> {
    factory: &'a mut NodeFactory,
    criteria: &'a dyn SelectionCriteria,
}

impl<'a> CodeDependencyCollector<'a> {
    pub fn new(factory: &'a mut NodeFactory, criteria: &'a dyn SelectionCriteria) -> Self {
        Self { factory, criteria }
    }

    /// Collect every dependency the classfile declares.
    pub fn collect(&mut self, classfile: &Classfile) -> Result<(), ClassfileError> {
        let class = self.factory.create_class(&classfile.class_name, true);

        if let Some(superclass) = &classfile.superclass_name {
            if let Some(parent) = self.add_class_dependency(class, superclass) {
                self.factory.add_parent(class, parent);
            }
        }
        for interface in &classfile.interface_names {
            if let Some(parent) = self.add_class_dependency(class, interface) {
                self.factory.add_parent(class, parent);
            }
        }

        for field in &classfile.fields {
            self.collect_field(field);
        }
        for method in &classfile.methods {
            self.collect_method(classfile, method)?;
        }
        Ok(())
    }

    fn collect_field(&mut self, field: &Field) {
        let current = self.factory.create_feature(&field.signature, true);
        for class_name in descriptor::class_names(&field.descriptor) {
            self.add_class_dependency(current, &class_name);
        }
    }

    fn collect_method(
        &mut self,
        classfile: &Classfile,
        method: &Method,
    ) -> Result<(), ClassfileError> {
        let current = self.factory.create_feature(&method.signature, true);

        for class_name in descriptor::class_names(&method.descriptor) {
            self.add_class_dependency(current, &class_name);
        }
        for exception in method.thrown_exceptions() {
            self.add_class_dependency(current, exception);
        }

        let Some(code) = method.code() else {
            return Ok(());
        };

        for handler in &code.exception_handlers {
            if let Some(catch_type) = &handler.catch_type {
                self.add_class_dependency(current, catch_type);
            }
        }

        for instruction in code.instructions() {
            let instruction = instruction.map_err(|source| {
                ClassfileError::MalformedInstruction {
                    context: method.signature.clone(),
                    source,
                }
            })?;
            // `new` is always followed by the constructor invocation, which
            // yields a more precise feature edge; skip the class-only ref.
            if instruction.opcode() == opcode::NEW {
                continue;
            }
            let Some(index) = instruction.constant_pool_index() else {
                continue;
            };
            self.collect_pool_operand(classfile, current, index)?;
        }
        Ok(())
    }

    fn collect_pool_operand(
        &mut self,
        classfile: &Classfile,
        current: NodeId,
        index: u16,
    ) -> Result<(), ClassfileError> {
        let pool = &classfile.constant_pool;
        match pool.entry(index)? {
            ConstantPoolEntry::Class { .. } => {
                let raw = pool.raw_class_name(index)?;
                self.add_class_reference(current, raw);
            }
            ConstantPoolEntry::FieldRef { .. }
            | ConstantPoolEntry::MethodRef { .. }
            | ConstantPoolEntry::InterfaceMethodRef { .. } => {
                let member = pool.member_ref(index)?;
                // Static initializers are internal wiring, not an API
                // surface anything can depend on.
                if member.member_name == "<clinit>" {
                    return Ok(());
                }
                if member.class_name.starts_with('[') {
                    // Array receiver (e.g. clone() on an array type): only
                    // the component classes are real dependencies.
                    self.add_class_reference(current, &member.class_name);
                    return Ok(());
                }
                let feature = descriptor::feature_name(
                    &member.class_name,
                    &member.member_name,
                    &member.descriptor,
                    member.kind == MemberKind::Method,
                )?;
                self.add_feature_dependency(current, &feature);
            }
            ConstantPoolEntry::InvokeDynamic { name_and_type_index, .. }
            | ConstantPoolEntry::Dynamic { name_and_type_index, .. } => {
                let (_, descriptor) = pool.name_and_type(*name_and_type_index)?;
                for class_name in descriptor::class_names(descriptor) {
                    self.add_class_dependency(current, &class_name);
                }
            }
            ConstantPoolEntry::MethodType { descriptor_index } => {
                let descriptor = pool.utf8(*descriptor_index)?;
                for class_name in descriptor::class_names(descriptor) {
                    self.add_class_dependency(current, &class_name);
                }
            }
            // ldc of a primitive or string constant carries no dependency.
            _ => {}
        }
        Ok(())
    }

    /// A class reference in raw (internal) form; array references contribute
    /// their component classes.
    fn add_class_reference(&mut self, from: NodeId, raw: &str) {
        if raw.starts_with('[') {
            for class_name in descriptor::class_names(&raw.replace('.', "/")) {
                self.add_class_dependency(from, &class_name);
            }
        } else {
            let name = crate::classfile::constant_pool::external_class_name(raw);
            self.add_class_dependency(from, &name);
        }
    }

    fn add_class_dependency(&mut self, from: NodeId, name: &str) -> Option<NodeId> {
        if !self.criteria.matches_class_name(name) {
            return None;
        }
        let to = self.factory.create_class(name, false);
        self.factory.add_dependency(from, to);
        Some(to)
    }

    fn add_feature_dependency(&mut self, from: NodeId, name: &str) {
        if !self.criteria.matches_feature_name(name) {
            return;
        }
        let to = self.factory.create_feature(name, false);
        self.factory.add_dependency(from, to);
    }
}
