//! Bytecode instruction decoding.
//!
//! [`Instruction::decode`] is a pure function of `(code, offset)`: it decodes
//! exactly one instruction, computing its total length including operands and
//! any alignment padding. The offset must be relative to the start of the
//! method's code array, because `tableswitch`/`lookupswitch` padding depends
//! on the absolute position within that array (`3 - offset % 4`), not on the
//! instruction's own start inside an arbitrary slice.
//!
//! Unknown opcodes are a hard decode error, never a silent skip, so a
//! successfully decoded stream always satisfies
//! `sum(instruction.length) == code.len()`.

use super::error::InstructionError;

/// Mnemonic and base length for each opcode; `None` marks undefined opcodes.
///
/// Base lengths cover fixed-operand opcodes. `tableswitch` (0xaa),
/// `lookupswitch` (0xab) and `wide` (0xc4) carry a placeholder here and are
/// measured during decoding.
#[rustfmt::skip]
const OPCODES: [Option<(&str, usize)>; 256] = [
    /* 0x00 */ Some(("nop", 1)),
    /* 0x01 */ Some(("aconst_null", 1)),
    /* 0x02 */ Some(("iconst_m1", 1)),
    /* 0x03 */ Some(("iconst_0", 1)),
    /* 0x04 */ Some(("iconst_1", 1)),
    /* 0x05 */ Some(("iconst_2", 1)),
    /* 0x06 */ Some(("iconst_3", 1)),
    /* 0x07 */ Some(("iconst_4", 1)),
    /* 0x08 */ Some(("iconst_5", 1)),
    /* 0x09 */ Some(("lconst_0", 1)),
    /* 0x0a */ Some(("lconst_1", 1)),
    /* 0x0b */ Some(("fconst_0", 1)),
    /* 0x0c */ Some(("fconst_1", 1)),
    /* 0x0d */ Some(("fconst_2", 1)),
    /* 0x0e */ Some(("dconst_0", 1)),
    /* 0x0f */ Some(("dconst_1", 1)),
    /* 0x10 */ Some(("bipush", 2)),
    /* 0x11 */ Some(("sipush", 3)),
    /* 0x12 */ Some(("ldc", 2)),
    /* 0x13 */ Some(("ldc_w", 3)),
    /* 0x14 */ Some(("ldc2_w", 3)),
    /* 0x15 */ Some(("iload", 2)),
    /* 0x16 */ Some(("lload", 2)),
    /* 0x17 */ Some(("fload", 2)),
    /* 0x18 */ Some(("dload", 2)),
    /* 0x19 */ Some(("aload", 2)),
    /* 0x1a */ Some(("iload_0", 1)),
    /* 0x1b */ Some(("iload_1", 1)),
    /* 0x1c */ Some(("iload_2", 1)),
    /* 0x1d */ Some(("iload_3", 1)),
    /* 0x1e */ Some(("lload_0", 1)),
    /* 0x1f */ Some(("lload_1", 1)),
    /* 0x20 */ Some(("lload_2", 1)),
    /* 0x21 */ Some(("lload_3", 1)),
    /* 0x22 */ Some(("fload_0", 1)),
    /* 0x23 */ Some(("fload_1", 1)),
    /* 0x24 */ Some(("fload_2", 1)),
    /* 0x25 */ Some(("fload_3", 1)),
    /* 0x26 */ Some(("dload_0", 1)),
    /* 0x27 */ Some(("dload_1", 1)),
    /* 0x28 */ Some(("dload_2", 1)),
    /* 0x29 */ Some(("dload_3", 1)),
    /* 0x2a */ Some(("aload_0", 1)),
    /* 0x2b */ Some(("aload_1", 1)),
    /* 0x2c */ Some(("aload_2", 1)),
    /* 0x2d */ Some(("aload_3", 1)),
    /* 0x2e */ Some(("iaload", 1)),
    /* 0x2f */ Some(("laload", 1)),
    /* 0x30 */ Some(("faload", 1)),
    /* 0x31 */ Some(("daload", 1)),
    /* 0x32 */ Some(("aaload", 1)),
    /* 0x33 */ Some(("baload", 1)),
    /* 0x34 */ Some(("caload", 1)),
    /* 0x35 */ Some(("saload", 1)),
    /* 0x36 */ Some(("istore", 2)),
    /* 0x37 */ Some(("lstore", 2)),
    /* 0x38 */ Some(("fstore", 2)),
    /* 0x39 */ Some(("dstore", 2)),
    /* 0x3a */ Some(("astore", 2)),
    /* 0x3b */ Some(("istore_0", 1)),
    /* 0x3c */ Some(("istore_1", 1)),
    /* 0x3d */ Some(("istore_2", 1)),
    /* 0x3e */ Some(("istore_3", 1)),
    /* 0x3f */ Some(("lstore_0", 1)),
    /* 0x40 */ Some(("lstore_1", 1)),
    /* 0x41 */ Some(("lstore_2", 1)),
    /* 0x42 */ Some(("lstore_3", 1)),
    /* 0x43 */ Some(("fstore_0", 1)),
    /* 0x44 */ Some(("fstore_1", 1)),
    /* 0x45 */ Some(("fstore_2", 1)),
    /* 0x46 */ Some(("fstore_3", 1)),
    /* 0x47 */ Some(("dstore_0", 1)),
    /* 0x48 */ Some(("dstore_1", 1)),
    /* 0x49 */ Some(("dstore_2", 1)),
    /* 0x4a */ Some(("dstore_3", 1)),
    /* 0x4b */ Some(("astore_0", 1)),
    /* 0x4c */ Some(("astore_1", 1)),
    /* 0x4d */ Some(("astore_2", 1)),
    /* 0x4e */ Some(("astore_3", 1)),
    /* 0x4f */ Some(("iastore", 1)),
    /* 0x50 */ Some(("lastore", 1)),
    /* 0x51 */ Some(("fastore", 1)),
    /* 0x52 */ Some(("dastore", 1)),
    /* 0x53 */ Some(("aastore", 1)),
    /* 0x54 */ Some(("bastore", 1)),
    /* 0x55 */ Some(("castore", 1)),
    /* 0x56 */ Some(("sastore", 1)),
    /* 0x57 */ Some(("pop", 1)),
    /* 0x58 */ Some(("pop2", 1)),
    /* 0x59 */ Some(("dup", 1)),
    /* 0x5a */ Some(("dup_x1", 1)),
    /* 0x5b */ Some(("dup_x2", 1)),
    /* 0x5c */ Some(("dup2", 1)),
    /* 0x5d */ Some(("dup2_x1", 1)),
    /* 0x5e */ Some(("dup2_x2", 1)),
    /* 0x5f */ Some(("swap", 1)),
    /* 0x60 */ Some(("iadd", 1)),
    /* 0x61 */ Some(("ladd", 1)),
    /* 0x62 */ Some(("fadd", 1)),
    /* 0x63 */ Some(("dadd", 1)),
    /* 0x64 */ Some(("isub", 1)),
    /* 0x65 */ Some(("lsub", 1)),
    /* 0x66 */ Some(("fsub", 1)),
    /* 0x67 */ Some(("dsub", 1)),
    /* 0x68 */ Some(("imul", 1)),
    /* 0x69 */ Some(("lmul", 1)),
    /* 0x6a */ Some(("fmul", 1)),
    /* 0x6b */ Some(("dmul", 1)),
    /* 0x6c */ Some(("idiv", 1)),
    /* 0x6d */ Some(("ldiv", 1)),
    /* 0x6e */ Some(("fdiv", 1)),
    /* 0x6f */ Some(("ddiv", 1)),
    /* 0x70 */ Some(("irem", 1)),
    /* 0x71 */ Some(("lrem", 1)),
    /* 0x72 */ Some(("frem", 1)),
    /* 0x73 */ Some(("drem", 1)),
    /* 0x74 */ Some(("ineg", 1)),
    /* 0x75 */ Some(("lneg", 1)),
    /* 0x76 */ Some(("fneg", 1)),
    /* 0x77 */ Some(("dneg", 1)),
    /* 0x78 */ Some(("ishl", 1)),
    /* 0x79 */ Some(("lshl", 1)),
    /* 0x7a */ Some(("ishr", 1)),
    /* 0x7b */ Some(("lshr", 1)),
    /* 0x7c */ Some(("iushr", 1)),
    /* 0x7d */ Some(("lushr", 1)),
    /* 0x7e */ Some(("iand", 1)),
    /* 0x7f */ Some(("land", 1)),
    /* 0x80 */ Some(("ior", 1)),
    /* 0x81 */ Some(("lor", 1)),
    /* 0x82 */ Some(("ixor", 1)),
    /* 0x83 */ Some(("lxor", 1)),
    /* 0x84 */ Some(("iinc", 3)),
    /* 0x85 */ Some(("i2l", 1)),
    /* 0x86 */ Some(("i2f", 1)),
    /* 0x87 */ Some(("i2d", 1)),
    /* 0x88 */ Some(("l2i", 1)),
    /* 0x89 */ Some(("l2f", 1)),
    /* 0x8a */ Some(("l2d", 1)),
    /* 0x8b */ Some(("f2i", 1)),
    /* 0x8c */ Some(("f2l", 1)),
    /* 0x8d */ Some(("f2d", 1)),
    /* 0x8e */ Some(("d2i", 1)),
    /* 0x8f */ Some(("d2l", 1)),
    /* 0x90 */ Some(("d2f", 1)),
    /* 0x91 */ Some(("i2b", 1)),
    /* 0x92 */ Some(("i2c", 1)),
    /* 0x93 */ Some(("i2s", 1)),
    /* 0x94 */ Some(("lcmp", 1)),
    /* 0x95 */ Some(("fcmpl", 1)),
    /* 0x96 */ Some(("fcmpg", 1)),
    /* 0x97 */ Some(("dcmpl", 1)),
    /* 0x98 */ Some(("dcmpg", 1)),
    /* 0x99 */ Some(("ifeq", 3)),
    /* 0x9a */ Some(("ifne", 3)),
    /* 0x9b */ Some(("iflt", 3)),
    /* 0x9c */ Some(("ifge", 3)),
    /* 0x9d */ Some(("ifgt", 3)),
    /* 0x9e */ Some(("ifle", 3)),
    /* 0x9f */ Some(("if_icmpeq", 3)),
    /* 0xa0 */ Some(("if_icmpne", 3)),
    /* 0xa1 */ Some(("if_icmplt", 3)),
    /* 0xa2 */ Some(("if_icmpge", 3)),
    /* 0xa3 */ Some(("if_icmpgt", 3)),
    /* 0xa4 */ Some(("if_icmple", 3)),
    /* 0xa5 */ Some(("if_acmpeq", 3)),
    /* 0xa6 */ Some(("if_acmpne", 3)),
    /* 0xa7 */ Some(("goto", 3)),
    /* 0xa8 */ Some(("jsr", 3)),
    /* 0xa9 */ Some(("ret", 2)),
    /* 0xaa */ Some(("tableswitch", 1)),
    /* 0xab */ Some(("lookupswitch", 1)),
    /* 0xac */ Some(("ireturn", 1)),
    /* 0xad */ Some(("lreturn", 1)),
    /* 0xae */ Some(("freturn", 1)),
    /* 0xaf */ Some(("dreturn", 1)),
    /* 0xb0 */ Some(("areturn", 1)),
    /* 0xb1 */ Some(("return", 1)),
    /* 0xb2 */ Some(("getstatic", 3)),
    /* 0xb3 */ Some(("putstatic", 3)),
    /* 0xb4 */ Some(("getfield", 3)),
    /* 0xb5 */ Some(("putfield", 3)),
    /* 0xb6 */ Some(("invokevirtual", 3)),
    /* 0xb7 */ Some(("invokespecial", 3)),
    /* 0xb8 */ Some(("invokestatic", 3)),
    /* 0xb9 */ Some(("invokeinterface", 5)),
    /* 0xba */ Some(("invokedynamic", 5)),
    /* 0xbb */ Some(("new", 3)),
    /* 0xbc */ Some(("newarray", 2)),
    /* 0xbd */ Some(("anewarray", 3)),
    /* 0xbe */ Some(("arraylength", 1)),
    /* 0xbf */ Some(("athrow", 1)),
    /* 0xc0 */ Some(("checkcast", 3)),
    /* 0xc1 */ Some(("instanceof", 3)),
    /* 0xc2 */ Some(("monitorenter", 1)),
    /* 0xc3 */ Some(("monitorexit", 1)),
    /* 0xc4 */ Some(("wide", 1)),
    /* 0xc5 */ Some(("multianewarray", 4)),
    /* 0xc6 */ Some(("ifnull", 3)),
    /* 0xc7 */ Some(("ifnonnull", 3)),
    /* 0xc8 */ Some(("goto_w", 5)),
    /* 0xc9 */ Some(("jsr_w", 5)),
    /* 0xca */ Some(("breakpoint", 1)),
    /* 0xcb */ None,
    /* 0xcc */ None,
    /* 0xcd */ None,
    /* 0xce */ None,
    /* 0xcf */ None,
    /* 0xd0 */ None,
    /* 0xd1 */ None,
    /* 0xd2 */ None,
    /* 0xd3 */ None,
    /* 0xd4 */ None,
    /* 0xd5 */ None,
    /* 0xd6 */ None,
    /* 0xd7 */ None,
    /* 0xd8 */ None,
    /* 0xd9 */ None,
    /* 0xda */ None,
    /* 0xdb */ None,
    /* 0xdc */ None,
    /* 0xdd */ None,
    /* 0xde */ None,
    /* 0xdf */ None,
    /* 0xe0 */ None,
    /* 0xe1 */ None,
    /* 0xe2 */ None,
    /* 0xe3 */ None,
    /* 0xe4 */ None,
    /* 0xe5 */ None,
    /* 0xe6 */ None,
    /* 0xe7 */ None,
    /* 0xe8 */ None,
    /* 0xe9 */ None,
    /* 0xea */ None,
    /* 0xeb */ None,
    /* 0xec */ None,
    /* 0xed */ None,
    /* 0xee */ None,
    /* 0xef */ None,
    /* 0xf0 */ None,
    /* 0xf1 */ None,
    /* 0xf2 */ None,
    /* 0xf3 */ None,
    /* 0xf4 */ None,
    /* 0xf5 */ None,
    /* 0xf6 */ None,
    /* 0xf7 */ None,
    /* 0xf8 */ None,
    /* 0xf9 */ None,
    /* 0xfa */ None,
    /* 0xfb */ None,
    /* 0xfc */ None,
    /* 0xfd */ None,
    /* 0xfe */ Some(("impdep1", 1)),
    /* 0xff */ Some(("impdep2", 1)),
];

/// Opcode constants used by the dependency collector.
pub mod opcode {
    pub const LDC: u8 = 0x12;
    pub const LDC_W: u8 = 0x13;
    pub const LDC2_W: u8 = 0x14;
    pub const IINC: u8 = 0x84;
    pub const TABLESWITCH: u8 = 0xaa;
    pub const LOOKUPSWITCH: u8 = 0xab;
    pub const GETSTATIC: u8 = 0xb2;
    pub const PUTSTATIC: u8 = 0xb3;
    pub const GETFIELD: u8 = 0xb4;
    pub const PUTFIELD: u8 = 0xb5;
    pub const INVOKEVIRTUAL: u8 = 0xb6;
    pub const INVOKESPECIAL: u8 = 0xb7;
    pub const INVOKESTATIC: u8 = 0xb8;
    pub const INVOKEINTERFACE: u8 = 0xb9;
    pub const INVOKEDYNAMIC: u8 = 0xba;
    pub const NEW: u8 = 0xbb;
    pub const ANEWARRAY: u8 = 0xbd;
    pub const CHECKCAST: u8 = 0xc0;
    pub const INSTANCEOF: u8 = 0xc1;
    pub const WIDE: u8 = 0xc4;
    pub const MULTIANEWARRAY: u8 = 0xc5;
    pub const GOTO_W: u8 = 0xc8;
    pub const JSR_W: u8 = 0xc9;
}

/// One decoded bytecode instruction, borrowing its code array.
#[derive(Debug, Clone, Copy)]
pub struct Instruction<'a> {
    bytecode: &'a [u8],
    start: usize,
    length: usize,
}

fn read_i32(code: &[u8], pos: usize, at: usize) -> Result<i32, InstructionError> {
    let bytes = code
        .get(pos..pos + 4)
        .ok_or(InstructionError::Truncated {
            offset: at,
            needed: pos + 4 - at,
            available: code.len().saturating_sub(at),
        })?;
    Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// A switch's declared length may be far larger than any real code array
/// (a tableswitch span is up to 2^32 entries). Reject it against the
/// remaining bytes before narrowing to usize.
fn checked_switch_length(total: u64, code: &[u8], at: usize) -> Result<usize, InstructionError> {
    let available = code.len() - at;
    if total > available as u64 {
        return Err(InstructionError::Truncated {
            offset: at,
            needed: usize::try_from(total).unwrap_or(usize::MAX),
            available,
        });
    }
    Ok(total as usize)
}

impl<'a> Instruction<'a> {
    /// Decode exactly one instruction at `start` within `code`.
    ///
    /// `start` must be the offset within the method's code array, because
    /// switch padding is position-sensitive.
    pub fn decode(code: &'a [u8], start: usize) -> Result<Self, InstructionError> {
        let opcode = *code.get(start).ok_or(InstructionError::Truncated {
            offset: start,
            needed: 1,
            available: 0,
        })?;

        let (_, base_length) = OPCODES[opcode as usize]
            .ok_or(InstructionError::UnknownOpcode {
                opcode,
                offset: start,
            })?;

        let length = match opcode {
            opcode::TABLESWITCH => {
                let padding = 3 - (start % 4);
                let low = read_i32(code, start + padding + 5, start)?;
                let high = read_i32(code, start + padding + 9, start)?;
                if high < low {
                    return Err(InstructionError::BadSwitch { offset: start });
                }
                // opcode + padding + default/low/high + jump table; the span
                // can exceed i32 so the length is computed in 64 bits.
                let span = i64::from(high) - i64::from(low) + 1;
                let total = 13 + padding as u64 + span as u64 * 4;
                checked_switch_length(total, code, start)?
            }
            opcode::LOOKUPSWITCH => {
                let padding = 3 - (start % 4);
                let npairs = read_i32(code, start + padding + 5, start)?;
                if npairs < 0 {
                    return Err(InstructionError::BadSwitch { offset: start });
                }
                // opcode + padding + default/npairs + match-offset pairs
                let total = 9 + padding as u64 + npairs as u64 * 8;
                checked_switch_length(total, code, start)?
            }
            opcode::WIDE => {
                let modified = *code.get(start + 1).ok_or(InstructionError::Truncated {
                    offset: start,
                    needed: 2,
                    available: code.len() - start,
                })?;
                if modified == opcode::IINC {
                    6
                } else {
                    4
                }
            }
            _ => base_length,
        };

        if start + length > code.len() {
            return Err(InstructionError::Truncated {
                offset: start,
                needed: length,
                available: code.len() - start,
            });
        }

        Ok(Self {
            bytecode: code,
            start,
            length,
        })
    }

    pub fn opcode(&self) -> u8 {
        self.bytecode[self.start]
    }

    /// Offset of this instruction within its code array.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Total length in bytes, operands and padding included. Always >= 1.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Mnemonic; for `wide` the modified instruction is appended
    /// (e.g. `"wide iload"`).
    pub fn mnemonic(&self) -> String {
        let name = Self::mnemonic_for(self.opcode());
        if self.opcode() == opcode::WIDE {
            format!("{} {}", name, Self::mnemonic_for(self.byte(1)))
        } else {
            name.to_string()
        }
    }

    /// Table mnemonic for a single opcode byte; `"xxxundefinedxxx"` for
    /// opcodes the decoder would reject.
    pub fn mnemonic_for(op: u8) -> &'static str {
        OPCODES[op as usize].map(|(name, _)| name).unwrap_or("xxxundefinedxxx")
    }

    fn byte(&self, offset: usize) -> u8 {
        self.bytecode[self.start + offset]
    }

    /// Local-variable or constant-pool index operand, when this opcode has
    /// one. Implicit-index opcodes (`iload_0` and friends) report their
    /// hardwired value.
    pub fn index(&self) -> Option<u16> {
        match self.opcode() {
            // wide-index constant pool forms
            0x13 | 0x14 | 0xb2..=0xbb | 0xbd | 0xc0 | 0xc1 | 0xc5 => {
                Some(u16::from_be_bytes([self.byte(1), self.byte(2)]))
            }
            // implicit local slots 0-3
            0x1a | 0x1e | 0x22 | 0x26 | 0x2a | 0x3b | 0x3f | 0x43 | 0x47 | 0x4b => Some(0),
            0x1b | 0x1f | 0x23 | 0x27 | 0x2b | 0x3c | 0x40 | 0x44 | 0x48 | 0x4c => Some(1),
            0x1c | 0x20 | 0x24 | 0x28 | 0x2c | 0x3d | 0x41 | 0x45 | 0x49 | 0x4d => Some(2),
            0x1d | 0x21 | 0x25 | 0x29 | 0x2d | 0x3e | 0x42 | 0x46 | 0x4a | 0x4e => Some(3),
            // single-byte index forms
            0x12 | 0x15..=0x19 | 0x36..=0x3a | 0x84 | 0xa9 => Some(self.byte(1) as u16),
            opcode::WIDE => Some(u16::from_be_bytes([self.byte(2), self.byte(3)])),
            _ => None,
        }
    }

    /// Constant-pool index for opcodes that reference the pool, regardless
    /// of narrow (`ldc`) or wide encoding.
    pub fn constant_pool_index(&self) -> Option<u16> {
        match self.opcode() {
            opcode::LDC => Some(self.byte(1) as u16),
            opcode::LDC_W
            | opcode::LDC2_W
            | opcode::GETSTATIC
            | opcode::PUTSTATIC
            | opcode::GETFIELD
            | opcode::PUTFIELD
            | opcode::INVOKEVIRTUAL
            | opcode::INVOKESPECIAL
            | opcode::INVOKESTATIC
            | opcode::INVOKEINTERFACE
            | opcode::INVOKEDYNAMIC
            | opcode::NEW
            | opcode::ANEWARRAY
            | opcode::CHECKCAST
            | opcode::INSTANCEOF
            | opcode::MULTIANEWARRAY => Some(u16::from_be_bytes([self.byte(1), self.byte(2)])),
            _ => None,
        }
    }

    /// Relative branch target for jump instructions.
    pub fn branch_offset(&self) -> Option<i32> {
        match self.opcode() {
            0x99..=0xa8 | 0xc6 | 0xc7 => {
                Some(i16::from_be_bytes([self.byte(1), self.byte(2)]) as i32)
            }
            opcode::GOTO_W | opcode::JSR_W => Some(i32::from_be_bytes([
                self.byte(1),
                self.byte(2),
                self.byte(3),
                self.byte(4),
            ])),
            _ => None,
        }
    }

    /// Immediate constant operand (`bipush`, `sipush`, `iinc` increment,
    /// `iconst_*` implicit values).
    pub fn value(&self) -> Option<i32> {
        match self.opcode() {
            0x02 => Some(-1),
            0x03 | 0x09 | 0x0b | 0x0e => Some(0),
            0x04 | 0x0a | 0x0c | 0x0f => Some(1),
            0x05 | 0x0d => Some(2),
            0x06 => Some(3),
            0x07 => Some(4),
            0x08 => Some(5),
            0x10 => Some(self.byte(1) as i8 as i32),
            0x11 => Some(i16::from_be_bytes([self.byte(1), self.byte(2)]) as i32),
            0x84 => Some(self.byte(2) as i8 as i32),
            opcode::WIDE if self.byte(1) == opcode::IINC => {
                Some(i16::from_be_bytes([self.byte(4), self.byte(5)]) as i32)
            }
            _ => None,
        }
    }
}

/// Iterator over a code array, yielding instructions until the end of the
/// array or the first decode error. After an error the iterator fuses.
pub struct InstructionIter<'a> {
    code: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> InstructionIter<'a> {
    pub fn new(code: &'a [u8]) -> Self {
        Self {
            code,
            pos: 0,
            failed: false,
        }
    }
}

impl<'a> Iterator for InstructionIter<'a> {
    type Item = Result<Instruction<'a>, InstructionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.code.len() {
            return None;
        }
        match Instruction::decode(self.code, self.pos) {
            Ok(instruction) => {
                self.pos += instruction.length();
                Some(Ok(instruction))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_defined_opcode_has_positive_base_length() {
        for entry in OPCODES.iter().flatten() {
            assert!(entry.1 >= 1);
        }
    }

    #[test]
    fn undefined_range_is_rejected() {
        for op in 0xcbu8..=0xfd {
            let code = [op];
            assert!(matches!(
                Instruction::decode(&code, 0),
                Err(InstructionError::UnknownOpcode { .. })
            ));
        }
    }

    #[test]
    fn wide_iinc_is_six_bytes() {
        let code = [opcode::WIDE, opcode::IINC, 0x01, 0x00, 0x00, 0x05];
        let instruction = Instruction::decode(&code, 0).unwrap();
        assert_eq!(instruction.length(), 6);
        assert_eq!(instruction.mnemonic(), "wide iinc");
        assert_eq!(instruction.index(), Some(0x0100));
        assert_eq!(instruction.value(), Some(5));
    }
}
