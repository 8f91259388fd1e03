//! Binary classfile parsing.
//!
//! Single forward pass over the byte stream. The constant pool is read raw
//! first (forward references between entries are legal), then symbolic names
//! are resolved while building the fields, methods and attributes. All
//! multi-byte quantities are big-endian.

use super::attributes::{Attribute, CodeAttribute, ExceptionHandler};
use super::constant_pool::{ConstantPool, ConstantPoolEntry};
use super::descriptor;
use super::error::ClassfileError;
use super::instruction::InstructionIter;
use super::{Classfile, Field, Method};

const MAGIC: u32 = 0xCAFE_BABE;

// JDK 1.0 through the latest released format revision.
const MIN_MAJOR_VERSION: u16 = 45;
const MAX_MAJOR_VERSION: u16 = 69;

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn bytes(&mut self, count: usize, context: &'static str) -> Result<&'a [u8], ClassfileError> {
        let slice = self
            .data
            .get(self.pos..self.pos + count)
            .ok_or(ClassfileError::Truncated(context))?;
        self.pos += count;
        Ok(slice)
    }

    fn u1(&mut self, context: &'static str) -> Result<u8, ClassfileError> {
        Ok(self.bytes(1, context)?[0])
    }

    fn u2(&mut self, context: &'static str) -> Result<u16, ClassfileError> {
        let b = self.bytes(2, context)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u4(&mut self, context: &'static str) -> Result<u32, ClassfileError> {
        let b = self.bytes(4, context)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// Parse one classfile from its raw bytes.
pub fn parse(data: &[u8]) -> Result<Classfile, ClassfileError> {
    let mut reader = Reader::new(data);

    let magic = reader.u4("magic number")?;
    if magic != MAGIC {
        return Err(ClassfileError::BadMagic(magic));
    }

    let minor_version = reader.u2("minor version")?;
    let major_version = reader.u2("major version")?;
    if !(MIN_MAJOR_VERSION..=MAX_MAJOR_VERSION).contains(&major_version) {
        return Err(ClassfileError::UnsupportedVersion(major_version));
    }

    let constant_pool = parse_constant_pool(&mut reader)?;

    let access_flags = reader.u2("access flags")?;
    let this_class = reader.u2("this_class index")?;
    let super_class = reader.u2("super_class index")?;

    let class_name = constant_pool.class_name(this_class)?;
    let superclass_name = if super_class == 0 {
        None
    } else {
        Some(constant_pool.class_name(super_class)?)
    };

    let interface_count = reader.u2("interface count")?;
    let mut interface_names = Vec::with_capacity(interface_count as usize);
    for _ in 0..interface_count {
        let index = reader.u2("interface index")?;
        interface_names.push(constant_pool.class_name(index)?);
    }

    let field_count = reader.u2("field count")?;
    let mut fields = Vec::with_capacity(field_count as usize);
    for _ in 0..field_count {
        fields.push(parse_field(&mut reader, &constant_pool, &class_name)?);
    }

    let method_count = reader.u2("method count")?;
    let mut methods = Vec::with_capacity(method_count as usize);
    for _ in 0..method_count {
        methods.push(parse_method(&mut reader, &constant_pool, &class_name)?);
    }

    let attributes = parse_attributes(&mut reader, &constant_pool, &class_name)?;

    Ok(Classfile {
        minor_version,
        major_version,
        constant_pool,
        access_flags,
        class_name,
        superclass_name,
        interface_names,
        fields,
        methods,
        attributes,
    })
}

fn parse_constant_pool(reader: &mut Reader<'_>) -> Result<ConstantPool, ClassfileError> {
    let count = reader.u2("constant pool count")?;
    let mut entries = Vec::with_capacity(count as usize);
    entries.push(ConstantPoolEntry::Unusable);

    while entries.len() < count as usize {
        let tag = reader.u1("constant pool tag")?;
        let entry = match tag {
            1 => {
                let length = reader.u2("Utf8 length")?;
                let bytes = reader.bytes(length as usize, "Utf8 bytes")?;
                // Modified UTF-8; lossy is fine, class names are ASCII-clean.
                ConstantPoolEntry::Utf8(String::from_utf8_lossy(bytes).into_owned())
            }
            3 => ConstantPoolEntry::Integer(reader.u4("Integer value")? as i32),
            4 => ConstantPoolEntry::Float(f32::from_bits(reader.u4("Float value")?)),
            5 => {
                let high = reader.u4("Long high word")? as u64;
                let low = reader.u4("Long low word")? as u64;
                ConstantPoolEntry::Long(((high << 32) | low) as i64)
            }
            6 => {
                let high = reader.u4("Double high word")? as u64;
                let low = reader.u4("Double low word")? as u64;
                ConstantPoolEntry::Double(f64::from_bits((high << 32) | low))
            }
            7 => ConstantPoolEntry::Class {
                name_index: reader.u2("Class name index")?,
            },
            8 => ConstantPoolEntry::String {
                string_index: reader.u2("String index")?,
            },
            9 => ConstantPoolEntry::FieldRef {
                class_index: reader.u2("FieldRef class index")?,
                name_and_type_index: reader.u2("FieldRef name_and_type index")?,
            },
            10 => ConstantPoolEntry::MethodRef {
                class_index: reader.u2("MethodRef class index")?,
                name_and_type_index: reader.u2("MethodRef name_and_type index")?,
            },
            11 => ConstantPoolEntry::InterfaceMethodRef {
                class_index: reader.u2("InterfaceMethodRef class index")?,
                name_and_type_index: reader.u2("InterfaceMethodRef name_and_type index")?,
            },
            12 => ConstantPoolEntry::NameAndType {
                name_index: reader.u2("NameAndType name index")?,
                descriptor_index: reader.u2("NameAndType descriptor index")?,
            },
            15 => ConstantPoolEntry::MethodHandle {
                reference_kind: reader.u1("MethodHandle kind")?,
                reference_index: reader.u2("MethodHandle reference index")?,
            },
            16 => ConstantPoolEntry::MethodType {
                descriptor_index: reader.u2("MethodType descriptor index")?,
            },
            17 => ConstantPoolEntry::Dynamic {
                bootstrap_method_attr_index: reader.u2("Dynamic bootstrap index")?,
                name_and_type_index: reader.u2("Dynamic name_and_type index")?,
            },
            18 => ConstantPoolEntry::InvokeDynamic {
                bootstrap_method_attr_index: reader.u2("InvokeDynamic bootstrap index")?,
                name_and_type_index: reader.u2("InvokeDynamic name_and_type index")?,
            },
            19 => ConstantPoolEntry::Module {
                name_index: reader.u2("Module name index")?,
            },
            20 => ConstantPoolEntry::Package {
                name_index: reader.u2("Package name index")?,
            },
            other => return Err(ClassfileError::BadConstantTag(other)),
        };

        let two_slots = matches!(
            entry,
            ConstantPoolEntry::Long(_) | ConstantPoolEntry::Double(_)
        );
        entries.push(entry);
        if two_slots {
            entries.push(ConstantPoolEntry::Unusable);
        }
    }

    Ok(ConstantPool::from_entries(entries))
}

fn parse_field(
    reader: &mut Reader<'_>,
    pool: &ConstantPool,
    class_name: &str,
) -> Result<Field, ClassfileError> {
    let access_flags = reader.u2("field access flags")?;
    let name = pool.utf8(reader.u2("field name index")?)?.to_string();
    let descriptor = pool.utf8(reader.u2("field descriptor index")?)?.to_string();
    let signature = descriptor::feature_name(class_name, &name, &descriptor, false)?;
    let attributes = parse_attributes(reader, pool, &signature)?;
    Ok(Field {
        access_flags,
        name,
        descriptor,
        signature,
        attributes,
    })
}

fn parse_method(
    reader: &mut Reader<'_>,
    pool: &ConstantPool,
    class_name: &str,
) -> Result<Method, ClassfileError> {
    let access_flags = reader.u2("method access flags")?;
    let name = pool.utf8(reader.u2("method name index")?)?.to_string();
    let descriptor = pool.utf8(reader.u2("method descriptor index")?)?.to_string();
    let signature = descriptor::feature_name(class_name, &name, &descriptor, true)?;
    let attributes = parse_attributes(reader, pool, &signature)?;
    Ok(Method {
        access_flags,
        name,
        descriptor,
        signature,
        attributes,
    })
}

fn parse_attributes(
    reader: &mut Reader<'_>,
    pool: &ConstantPool,
    context: &str,
) -> Result<Vec<Attribute>, ClassfileError> {
    let count = reader.u2("attribute count")?;
    let mut attributes = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let name = pool.utf8(reader.u2("attribute name index")?)?.to_string();
        let length = reader.u4("attribute length")? as usize;
        let body = reader.bytes(length, "attribute body")?;
        // Each attribute is parsed from its own body slice so a known
        // attribute can never consume past its declared length.
        let mut body_reader = Reader::new(body);
        let attribute = match name.as_str() {
            "Code" => parse_code_attribute(&mut body_reader, pool, context)?,
            "ConstantValue" => {
                let index = body_reader.u2("ConstantValue index")?;
                Attribute::ConstantValue(render_constant(pool, index)?)
            }
            "Exceptions" => {
                let exception_count = body_reader.u2("exception count")?;
                let mut names = Vec::with_capacity(exception_count as usize);
                for _ in 0..exception_count {
                    let index = body_reader.u2("exception class index")?;
                    names.push(pool.class_name(index)?);
                }
                Attribute::Exceptions(names)
            }
            "SourceFile" => {
                let index = body_reader.u2("SourceFile index")?;
                Attribute::SourceFile(pool.utf8(index)?.to_string())
            }
            "Signature" => {
                let index = body_reader.u2("Signature index")?;
                Attribute::Signature(pool.utf8(index)?.to_string())
            }
            "Synthetic" => Attribute::Synthetic,
            "Deprecated" => Attribute::Deprecated,
            _ => Attribute::Unknown {
                name,
                data: body.to_vec(),
            },
        };
        attributes.push(attribute);
    }
    Ok(attributes)
}

fn parse_code_attribute(
    reader: &mut Reader<'_>,
    pool: &ConstantPool,
    context: &str,
) -> Result<Attribute, ClassfileError> {
    let max_stack = reader.u2("max_stack")?;
    let max_locals = reader.u2("max_locals")?;
    let code_length = reader.u4("code length")? as usize;
    let code = reader.bytes(code_length, "bytecode")?.to_vec();

    // Reject undecodable streams at parse time so every later traversal of
    // this method's bytecode is infallible in practice.
    for instruction in InstructionIter::new(&code) {
        instruction.map_err(|source| ClassfileError::MalformedInstruction {
            context: context.to_string(),
            source,
        })?;
    }

    let handler_count = reader.u2("exception table length")?;
    let mut exception_handlers = Vec::with_capacity(handler_count as usize);
    for _ in 0..handler_count {
        let start_pc = reader.u2("handler start_pc")?;
        let end_pc = reader.u2("handler end_pc")?;
        let handler_pc = reader.u2("handler handler_pc")?;
        let catch_index = reader.u2("handler catch_type")?;
        let catch_type = if catch_index == 0 {
            None
        } else {
            Some(pool.class_name(catch_index)?)
        };
        exception_handlers.push(ExceptionHandler {
            start_pc,
            end_pc,
            handler_pc,
            catch_type,
        });
    }

    let attributes = parse_attributes(reader, pool, context)?;

    Ok(Attribute::Code(CodeAttribute {
        max_stack,
        max_locals,
        code,
        exception_handlers,
        attributes,
    }))
}

fn render_constant(pool: &ConstantPool, index: u16) -> Result<String, ClassfileError> {
    match pool.entry(index)? {
        ConstantPoolEntry::Integer(v) => Ok(v.to_string()),
        ConstantPoolEntry::Float(v) => Ok(v.to_string()),
        ConstantPoolEntry::Long(v) => Ok(v.to_string()),
        ConstantPoolEntry::Double(v) => Ok(v.to_string()),
        ConstantPoolEntry::String { string_index } => Ok(pool.utf8(*string_index)?.to_string()),
        other => Err(ClassfileError::UnresolvedReference {
            index,
            expected: "Integer/Float/Long/Double/String",
            found: other.tag_name(),
        }),
    }
}
