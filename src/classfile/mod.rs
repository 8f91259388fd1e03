//! JVM classfile decoder.
//!
//! Parses the binary classfile format (magic, constant pool, fields, methods,
//! attributes) into an owned model with symbolic names already resolved
//! through the constant pool. The decoder is strict: bad magic, unsupported
//! versions, dangling pool indices and undecodable bytecode are all hard
//! errors for the file.

pub mod attributes;
pub mod constant_pool;
pub mod descriptor;
pub mod error;
pub mod instruction;
pub mod metrics;
mod parser;

pub use parser::parse;

use attributes::{Attribute, CodeAttribute};
use constant_pool::ConstantPool;

/// Access and property flags shared by classes, fields and methods.
///
/// Some bit positions are context-dependent (0x0020 is `ACC_SUPER` on a
/// class but `ACC_SYNCHRONIZED` on a method); the constants here are named
/// for the contexts this crate inspects.
pub mod access_flags {
    pub const PUBLIC: u16 = 0x0001;
    pub const PRIVATE: u16 = 0x0002;
    pub const PROTECTED: u16 = 0x0004;
    pub const STATIC: u16 = 0x0008;
    pub const FINAL: u16 = 0x0010;
    pub const SUPER: u16 = 0x0020;
    pub const SYNCHRONIZED: u16 = 0x0020;
    pub const VOLATILE: u16 = 0x0040;
    pub const TRANSIENT: u16 = 0x0080;
    pub const NATIVE: u16 = 0x0100;
    pub const INTERFACE: u16 = 0x0200;
    pub const ABSTRACT: u16 = 0x0400;
    pub const STRICT: u16 = 0x0800;
    pub const SYNTHETIC: u16 = 0x1000;
    pub const ANNOTATION: u16 = 0x2000;
    pub const ENUM: u16 = 0x4000;
    pub const MODULE: u16 = 0x8000;
}

/// One fully decoded classfile.
///
/// Names are in external (dotted) form and resolved eagerly at parse time,
/// so consumers never touch the constant pool for the common queries. The
/// pool itself is retained for bytecode operand resolution.
#[derive(Debug, Clone)]
pub struct Classfile {
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool: ConstantPool,
    pub access_flags: u16,
    /// This class's name, e.g. `java.lang.String`.
    pub class_name: String,
    /// `None` only for `java.lang.Object` and module-info files.
    pub superclass_name: Option<String>,
    pub interface_names: Vec<String>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub attributes: Vec<Attribute>,
}

impl Classfile {
    pub fn is_interface(&self) -> bool {
        self.access_flags & access_flags::INTERFACE != 0
    }

    pub fn is_public(&self) -> bool {
        self.access_flags & access_flags::PUBLIC != 0
    }

    pub fn is_abstract(&self) -> bool {
        self.access_flags & access_flags::ABSTRACT != 0
    }

    /// Package part of the class name; empty for the default package.
    pub fn package_name(&self) -> &str {
        match self.class_name.rfind('.') {
            Some(pos) => &self.class_name[..pos],
            None => "",
        }
    }

    /// Class name without its package prefix.
    pub fn simple_name(&self) -> &str {
        match self.class_name.rfind('.') {
            Some(pos) => &self.class_name[pos + 1..],
            None => &self.class_name,
        }
    }
}

/// A decoded field declaration.
#[derive(Debug, Clone)]
pub struct Field {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    /// Qualified name, `com.example.Foo.count`.
    pub signature: String,
    pub attributes: Vec<Attribute>,
}

impl Field {
    pub fn is_static(&self) -> bool {
        self.access_flags & access_flags::STATIC != 0
    }

    pub fn is_synthetic(&self) -> bool {
        self.access_flags & access_flags::SYNTHETIC != 0
            || self
                .attributes
                .iter()
                .any(|a| matches!(a, Attribute::Synthetic))
    }

    pub fn constant_value(&self) -> Option<&str> {
        self.attributes.iter().find_map(|a| match a {
            Attribute::ConstantValue(value) => Some(value.as_str()),
            _ => None,
        })
    }
}

/// A decoded method declaration.
#[derive(Debug, Clone)]
pub struct Method {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    /// Qualified signature with Java-spelled parameters,
    /// `com.example.Foo.bar(java.lang.String, int)`. Constructors use the
    /// simple class name in place of `<init>`.
    pub signature: String,
    pub attributes: Vec<Attribute>,
}

impl Method {
    pub fn is_static(&self) -> bool {
        self.access_flags & access_flags::STATIC != 0
    }

    pub fn is_abstract(&self) -> bool {
        self.access_flags & access_flags::ABSTRACT != 0
    }

    pub fn is_constructor(&self) -> bool {
        self.name == "<init>"
    }

    pub fn is_static_initializer(&self) -> bool {
        self.name == "<clinit>"
    }

    pub fn code(&self) -> Option<&CodeAttribute> {
        self.attributes.iter().find_map(|a| match a {
            Attribute::Code(code) => Some(code),
            _ => None,
        })
    }

    /// Exception class names from the `throws` clause.
    pub fn thrown_exceptions(&self) -> &[String] {
        self.attributes
            .iter()
            .find_map(|a| match a {
                Attribute::Exceptions(names) => Some(names.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}
