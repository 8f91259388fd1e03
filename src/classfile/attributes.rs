//! Classfile attribute model.
//!
//! Attribute names the decoder understands get structured variants; anything
//! else is preserved as raw bytes under [`Attribute::Unknown`] so a classfile
//! with exotic attributes still round-trips through analysis.

/// One entry in a `Code` attribute's exception table.
///
/// `catch_type` is `None` for `finally` handlers, which catch everything.
#[derive(Debug, Clone)]
pub struct ExceptionHandler {
    pub start_pc: u16,
    pub end_pc: u16,
    pub handler_pc: u16,
    pub catch_type: Option<String>,
}

/// The body of a method's `Code` attribute.
#[derive(Debug, Clone)]
pub struct CodeAttribute {
    pub max_stack: u16,
    pub max_locals: u16,
    pub code: Vec<u8>,
    pub exception_handlers: Vec<ExceptionHandler>,
    pub attributes: Vec<Attribute>,
}

impl CodeAttribute {
    /// Iterate the bytecode stream.
    pub fn instructions(&self) -> crate::classfile::instruction::InstructionIter<'_> {
        crate::classfile::instruction::InstructionIter::new(&self.code)
    }
}

/// A decoded attribute.
#[derive(Debug, Clone)]
pub enum Attribute {
    Code(CodeAttribute),
    /// Field initializer; the string is the resolved constant rendered
    /// through the pool (class names in external form).
    ConstantValue(String),
    /// `throws` clause, class names in external (dotted) form.
    Exceptions(Vec<String>),
    SourceFile(String),
    Signature(String),
    Synthetic,
    Deprecated,
    Unknown { name: String, data: Vec<u8> },
}

impl Attribute {
    pub fn name(&self) -> &str {
        match self {
            Attribute::Code(_) => "Code",
            Attribute::ConstantValue(_) => "ConstantValue",
            Attribute::Exceptions(_) => "Exceptions",
            Attribute::SourceFile(_) => "SourceFile",
            Attribute::Signature(_) => "Signature",
            Attribute::Synthetic => "Synthetic",
            Attribute::Deprecated => "Deprecated",
            Attribute::Unknown { name, .. } => name,
        }
    }
}
