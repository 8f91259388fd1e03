//! Shared helpers for building synthetic classfiles in tests.
//!
//! The builders emit real classfile bytes so tests exercise the binary
//! decoder end to end without fixture files.

#![allow(dead_code)]

/// Incremental constant pool builder. Indices are 1-based like the format.
pub struct PoolBuilder {
    bytes: Vec<u8>,
    count: u16,
}

impl PoolBuilder {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            count: 1,
        }
    }

    fn push(&mut self, entry: &[u8], slots: u16) -> u16 {
        let index = self.count;
        self.count += slots;
        self.bytes.extend_from_slice(entry);
        index
    }

    pub fn utf8(&mut self, s: &str) -> u16 {
        let mut entry = vec![1];
        entry.extend_from_slice(&(s.len() as u16).to_be_bytes());
        entry.extend_from_slice(s.as_bytes());
        self.push(&entry, 1)
    }

    /// Class entry; `name` in internal slash form.
    pub fn class(&mut self, name: &str) -> u16 {
        let name_index = self.utf8(name);
        let mut entry = vec![7];
        entry.extend_from_slice(&name_index.to_be_bytes());
        self.push(&entry, 1)
    }

    pub fn string(&mut self, value: &str) -> u16 {
        let string_index = self.utf8(value);
        let mut entry = vec![8];
        entry.extend_from_slice(&string_index.to_be_bytes());
        self.push(&entry, 1)
    }

    pub fn long(&mut self, value: i64) -> u16 {
        let mut entry = vec![5];
        entry.extend_from_slice(&value.to_be_bytes());
        self.push(&entry, 2)
    }

    pub fn integer(&mut self, value: i32) -> u16 {
        let mut entry = vec![3];
        entry.extend_from_slice(&value.to_be_bytes());
        self.push(&entry, 1)
    }

    pub fn name_and_type(&mut self, name: &str, descriptor: &str) -> u16 {
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);
        let mut entry = vec![12];
        entry.extend_from_slice(&name_index.to_be_bytes());
        entry.extend_from_slice(&descriptor_index.to_be_bytes());
        self.push(&entry, 1)
    }

    /// FieldRef to `class.name` with `descriptor`; class in slash form.
    pub fn field_ref(&mut self, class: &str, name: &str, descriptor: &str) -> u16 {
        let class_index = self.class(class);
        let nat_index = self.name_and_type(name, descriptor);
        let mut entry = vec![9];
        entry.extend_from_slice(&class_index.to_be_bytes());
        entry.extend_from_slice(&nat_index.to_be_bytes());
        self.push(&entry, 1)
    }

    /// MethodRef to `class.name` with `descriptor`; class in slash form.
    pub fn method_ref(&mut self, class: &str, name: &str, descriptor: &str) -> u16 {
        let class_index = self.class(class);
        let nat_index = self.name_and_type(name, descriptor);
        let mut entry = vec![10];
        entry.extend_from_slice(&class_index.to_be_bytes());
        entry.extend_from_slice(&nat_index.to_be_bytes());
        self.push(&entry, 1)
    }

    fn serialize(&self) -> Vec<u8> {
        let mut out = self.count.to_be_bytes().to_vec();
        out.extend_from_slice(&self.bytes);
        out
    }
}

/// Serialized field_info / method_info structure.
pub fn member_info(access_flags: u16, name_index: u16, descriptor_index: u16, attributes: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&access_flags.to_be_bytes());
    out.extend_from_slice(&name_index.to_be_bytes());
    out.extend_from_slice(&descriptor_index.to_be_bytes());
    out.extend_from_slice(&(attributes.len() as u16).to_be_bytes());
    for attribute in attributes {
        out.extend_from_slice(attribute);
    }
    out
}

/// Serialized Code attribute holding `code` with no exception handlers.
pub fn code_attribute(pool: &mut PoolBuilder, code: &[u8]) -> Vec<u8> {
    let name_index = pool.utf8("Code");
    let mut body = Vec::new();
    body.extend_from_slice(&2u16.to_be_bytes()); // max_stack
    body.extend_from_slice(&2u16.to_be_bytes()); // max_locals
    body.extend_from_slice(&(code.len() as u32).to_be_bytes());
    body.extend_from_slice(code);
    body.extend_from_slice(&0u16.to_be_bytes()); // exception table
    body.extend_from_slice(&0u16.to_be_bytes()); // attributes

    let mut out = Vec::new();
    out.extend_from_slice(&name_index.to_be_bytes());
    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
    out.extend_from_slice(&body);
    out
}

/// Raw attribute with arbitrary body bytes.
pub fn raw_attribute(pool: &mut PoolBuilder, name: &str, body: &[u8]) -> Vec<u8> {
    let name_index = pool.utf8(name);
    let mut out = Vec::new();
    out.extend_from_slice(&name_index.to_be_bytes());
    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
    out.extend_from_slice(body);
    out
}

/// Assemble a full classfile.
pub fn classfile_bytes(
    pool: PoolBuilder,
    access_flags: u16,
    this_class: u16,
    super_class: u16,
    interfaces: &[u16],
    fields: &[Vec<u8>],
    methods: &[Vec<u8>],
) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&0xCAFE_BABEu32.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes()); // minor
    out.extend_from_slice(&52u16.to_be_bytes()); // major (Java 8)
    out.extend_from_slice(&pool.serialize());
    out.extend_from_slice(&access_flags.to_be_bytes());
    out.extend_from_slice(&this_class.to_be_bytes());
    out.extend_from_slice(&super_class.to_be_bytes());
    out.extend_from_slice(&(interfaces.len() as u16).to_be_bytes());
    for interface in interfaces {
        out.extend_from_slice(&interface.to_be_bytes());
    }
    out.extend_from_slice(&(fields.len() as u16).to_be_bytes());
    for field in fields {
        out.extend_from_slice(field);
    }
    out.extend_from_slice(&(methods.len() as u16).to_be_bytes());
    for method in methods {
        out.extend_from_slice(method);
    }
    out.extend_from_slice(&0u16.to_be_bytes()); // class attributes
    out
}

/// The simplest valid classfile: `public class <name> extends <super>`
/// with no members. Names in slash form.
pub fn simple_class(name: &str, superclass: &str) -> Vec<u8> {
    let mut pool = PoolBuilder::new();
    let this_class = pool.class(name);
    let super_class = pool.class(superclass);
    classfile_bytes(pool, 0x0021, this_class, super_class, &[], &[], &[])
}
