//! Constant pool model and typed index resolution.
//!
//! Entries reference each other by pool index only, never by pointer, which
//! matches the binary format: forward references are legal (a NameAndType may
//! be defined after the FieldRef that uses it), so resolution is two-phase.
//! The parser records raw tagged entries; the typed getters here resolve
//! symbolic names on access and fail with `UnresolvedReference` when an index
//! does not hold the expected tag.
//!
//! Index 0 is invalid by definition, and the second slot of a Long or Double
//! entry is unusable; both are represented by [`ConstantPoolEntry::Unusable`].

use super::error::ClassfileError;

/// One raw entry in the constant pool.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantPoolEntry {
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    Class { name_index: u16 },
    String { string_index: u16 },
    FieldRef { class_index: u16, name_and_type_index: u16 },
    MethodRef { class_index: u16, name_and_type_index: u16 },
    InterfaceMethodRef { class_index: u16, name_and_type_index: u16 },
    NameAndType { name_index: u16, descriptor_index: u16 },
    MethodHandle { reference_kind: u8, reference_index: u16 },
    MethodType { descriptor_index: u16 },
    Dynamic { bootstrap_method_attr_index: u16, name_and_type_index: u16 },
    InvokeDynamic { bootstrap_method_attr_index: u16, name_and_type_index: u16 },
    Module { name_index: u16 },
    Package { name_index: u16 },
    /// Index 0, or the second slot of a Long/Double entry.
    Unusable,
}

impl ConstantPoolEntry {
    /// Tag name for error messages and metrics histograms.
    pub fn tag_name(&self) -> &'static str {
        match self {
            ConstantPoolEntry::Utf8(_) => "Utf8",
            ConstantPoolEntry::Integer(_) => "Integer",
            ConstantPoolEntry::Float(_) => "Float",
            ConstantPoolEntry::Long(_) => "Long",
            ConstantPoolEntry::Double(_) => "Double",
            ConstantPoolEntry::Class { .. } => "Class",
            ConstantPoolEntry::String { .. } => "String",
            ConstantPoolEntry::FieldRef { .. } => "FieldRef",
            ConstantPoolEntry::MethodRef { .. } => "MethodRef",
            ConstantPoolEntry::InterfaceMethodRef { .. } => "InterfaceMethodRef",
            ConstantPoolEntry::NameAndType { .. } => "NameAndType",
            ConstantPoolEntry::MethodHandle { .. } => "MethodHandle",
            ConstantPoolEntry::MethodType { .. } => "MethodType",
            ConstantPoolEntry::Dynamic { .. } => "Dynamic",
            ConstantPoolEntry::InvokeDynamic { .. } => "InvokeDynamic",
            ConstantPoolEntry::Module { .. } => "Module",
            ConstantPoolEntry::Package { .. } => "Package",
            ConstantPoolEntry::Unusable => "Unusable",
        }
    }
}

/// The indexed constant table of one classfile.
///
/// Slot numbering is 1-based as in the source format; slot 0 always holds
/// [`ConstantPoolEntry::Unusable`].
#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    entries: Vec<ConstantPoolEntry>,
}

impl ConstantPool {
    pub(crate) fn from_entries(entries: Vec<ConstantPoolEntry>) -> Self {
        Self { entries }
    }

    /// Number of slots, including slot 0 and Long/Double fillers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate raw entries in slot order, starting at slot 0.
    pub fn iter(&self) -> impl Iterator<Item = &ConstantPoolEntry> {
        self.entries.iter()
    }

    /// Resolve an index to its raw entry.
    ///
    /// Index 0 and Long/Double filler slots resolve to `Unusable`; callers
    /// that expect a specific tag should use the typed getters instead.
    pub fn entry(&self, index: u16) -> Result<&ConstantPoolEntry, ClassfileError> {
        self.entries
            .get(index as usize)
            .ok_or(ClassfileError::IndexOutOfRange {
                index,
                size: self.entries.len(),
            })
    }

    fn mismatch(&self, index: u16, expected: &'static str) -> ClassfileError {
        let found = self
            .entries
            .get(index as usize)
            .map(|e| e.tag_name())
            .unwrap_or("missing");
        ClassfileError::UnresolvedReference {
            index,
            expected,
            found,
        }
    }

    /// Resolve an index to a Utf8 string.
    pub fn utf8(&self, index: u16) -> Result<&str, ClassfileError> {
        match self.entry(index)? {
            ConstantPoolEntry::Utf8(s) => Ok(s),
            _ => Err(self.mismatch(index, "Utf8")),
        }
    }

    /// Resolve a Class entry to its name in internal (slash / bracket) form.
    pub fn raw_class_name(&self, index: u16) -> Result<&str, ClassfileError> {
        match self.entry(index)? {
            ConstantPoolEntry::Class { name_index } => self.utf8(*name_index),
            _ => Err(self.mismatch(index, "Class")),
        }
    }

    /// Resolve a Class entry to its external dot-separated name.
    ///
    /// Array class references keep their raw bracket form; callers that care
    /// should inspect [`ConstantPool::raw_class_name`] first.
    pub fn class_name(&self, index: u16) -> Result<String, ClassfileError> {
        Ok(external_class_name(self.raw_class_name(index)?))
    }

    /// Resolve a NameAndType entry to its (name, descriptor) pair.
    pub fn name_and_type(&self, index: u16) -> Result<(&str, &str), ClassfileError> {
        match self.entry(index)? {
            ConstantPoolEntry::NameAndType {
                name_index,
                descriptor_index,
            } => Ok((self.utf8(*name_index)?, self.utf8(*descriptor_index)?)),
            _ => Err(self.mismatch(index, "NameAndType")),
        }
    }

    /// Resolve a FieldRef/MethodRef/InterfaceMethodRef entry to its parts.
    pub fn member_ref(&self, index: u16) -> Result<MemberRef, ClassfileError> {
        let (kind, class_index, name_and_type_index) = match self.entry(index)? {
            ConstantPoolEntry::FieldRef {
                class_index,
                name_and_type_index,
            } => (MemberKind::Field, *class_index, *name_and_type_index),
            ConstantPoolEntry::MethodRef {
                class_index,
                name_and_type_index,
            } => (MemberKind::Method, *class_index, *name_and_type_index),
            ConstantPoolEntry::InterfaceMethodRef {
                class_index,
                name_and_type_index,
            } => (MemberKind::Method, *class_index, *name_and_type_index),
            _ => Err(self.mismatch(index, "FieldRef/MethodRef/InterfaceMethodRef"))?,
        };

        let (name, descriptor) = self.name_and_type(name_and_type_index)?;
        Ok(MemberRef {
            kind,
            class_name: self.class_name(class_index)?,
            member_name: name.to_string(),
            descriptor: descriptor.to_string(),
        })
    }
}

/// Whether a member reference names a field or a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Method,
}

/// Resolved view of a FieldRef/MethodRef/InterfaceMethodRef entry.
#[derive(Debug, Clone)]
pub struct MemberRef {
    pub kind: MemberKind,
    pub class_name: String,
    pub member_name: String,
    pub descriptor: String,
}

/// Convert an internal slash-separated class name to dot form.
pub fn external_class_name(raw: &str) -> String {
    raw.replace('/', ".")
}
