//! Error types for the classfile decoder.
//!
//! A `ClassfileError` is fatal for the file being decoded, never for a whole
//! batch: the loader reports it and moves on to the next entry.

/// Structural violation in a classfile.
#[derive(Debug, thiserror::Error)]
pub enum ClassfileError {
    /// First four bytes are not 0xCAFEBABE
    #[error("bad magic number 0x{0:08x}")]
    BadMagic(u32),

    /// Major version outside the supported range
    #[error("unsupported major version {0}")]
    UnsupportedVersion(u16),

    /// Input ended in the middle of a structure
    #[error("truncated classfile while reading {0}")]
    Truncated(&'static str),

    /// A constant pool entry carries a tag the format does not define
    #[error("unknown constant pool tag {0}")]
    BadConstantTag(u8),

    /// A constant pool index points outside the pool
    #[error("constant pool index {index} out of range (pool has {size} slots)")]
    IndexOutOfRange { index: u16, size: usize },

    /// A constant pool index resolves to an entry of the wrong tag
    #[error("constant pool entry {index} is {found}, expected {expected}")]
    UnresolvedReference {
        index: u16,
        expected: &'static str,
        found: &'static str,
    },

    /// A field or method descriptor does not follow the grammar
    #[error("malformed descriptor \"{0}\"")]
    BadDescriptor(String),

    /// A Code attribute contains an undecodable instruction stream
    #[error("malformed bytecode in {context}: {source}")]
    MalformedInstruction {
        context: String,
        #[source]
        source: InstructionError,
    },
}

/// Violation inside a single bytecode instruction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InstructionError {
    /// Opcode byte has no table entry
    #[error("unknown opcode 0x{opcode:02x} at offset {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },

    /// Declared operand length would read past the code array
    #[error("instruction at offset {offset} needs {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// tableswitch bounds or lookupswitch pair count are nonsensical
    #[error("invalid switch operands at offset {offset}")]
    BadSwitch { offset: usize },
}
