//! Aggregate counters over a batch of classfiles.

use std::collections::BTreeMap;

use serde::Serialize;

use super::constant_pool::ConstantPoolEntry;
use super::instruction::Instruction;
use super::{access_flags, Classfile};

/// Accumulates structural counts over every classfile it visits.
///
/// Histograms are keyed by name in `BTreeMap`s so serialized reports list
/// entries in a stable order.
#[derive(Debug, Default)]
pub struct MetricsGatherer {
    report: MetricsReport,
}

/// Serializable snapshot of the gathered counts.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MetricsReport {
    pub classfiles: u64,
    pub classes: u64,
    pub interfaces: u64,
    pub fields: u64,
    pub methods: u64,

    pub public_classes: u64,
    pub package_classes: u64,
    pub abstract_classes: u64,
    pub final_classes: u64,

    pub public_members: u64,
    pub protected_members: u64,
    pub private_members: u64,
    pub package_members: u64,
    pub static_members: u64,
    pub final_members: u64,
    pub abstract_methods: u64,
    pub synthetic_members: u64,
    pub deprecated_members: u64,

    pub code_bytes: u64,
    pub constant_pool_entries: BTreeMap<String, u64>,
    pub instructions: BTreeMap<String, u64>,
}

impl MetricsGatherer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visit(&mut self, classfile: &Classfile) {
        let r = &mut self.report;
        r.classfiles += 1;
        if classfile.is_interface() {
            r.interfaces += 1;
        } else {
            r.classes += 1;
        }
        if classfile.is_public() {
            r.public_classes += 1;
        } else {
            r.package_classes += 1;
        }
        if classfile.is_abstract() {
            r.abstract_classes += 1;
        }
        if classfile.access_flags & access_flags::FINAL != 0 {
            r.final_classes += 1;
        }

        // Slot 0 and Long/Double filler slots are not pool entries.
        for entry in classfile.constant_pool.iter() {
            if matches!(entry, ConstantPoolEntry::Unusable) {
                continue;
            }
            *r.constant_pool_entries
                .entry(entry.tag_name().to_string())
                .or_default() += 1;
        }

        for field in &classfile.fields {
            r.fields += 1;
            Self::count_member(r, field.access_flags, false);
            if field.is_synthetic() {
                r.synthetic_members += 1;
            }
        }

        for method in &classfile.methods {
            r.methods += 1;
            Self::count_member(r, method.access_flags, true);
            if method.access_flags & access_flags::SYNTHETIC != 0 {
                r.synthetic_members += 1;
            }
            if let Some(code) = method.code() {
                r.code_bytes += code.code.len() as u64;
                // Streams were validated at parse time; a decode failure
                // here would mean the model was built by hand.
                for instruction in code.instructions().flatten() {
                    *r.instructions
                        .entry(Instruction::mnemonic_for(instruction.opcode()).to_string())
                        .or_default() += 1;
                }
            }
        }

        for member in classfile.fields.iter().map(|f| &f.attributes).chain(
            classfile.methods.iter().map(|m| &m.attributes),
        ) {
            if member
                .iter()
                .any(|a| matches!(a, super::attributes::Attribute::Deprecated))
            {
                r.deprecated_members += 1;
            }
        }
    }

    fn count_member(report: &mut MetricsReport, flags: u16, is_method: bool) {
        if flags & access_flags::PUBLIC != 0 {
            report.public_members += 1;
        } else if flags & access_flags::PROTECTED != 0 {
            report.protected_members += 1;
        } else if flags & access_flags::PRIVATE != 0 {
            report.private_members += 1;
        } else {
            report.package_members += 1;
        }
        if flags & access_flags::STATIC != 0 {
            report.static_members += 1;
        }
        if flags & access_flags::FINAL != 0 {
            report.final_members += 1;
        }
        if is_method && flags & access_flags::ABSTRACT != 0 {
            report.abstract_methods += 1;
        }
    }

    pub fn report(&self) -> &MetricsReport {
        &self.report
    }

    pub fn into_report(self) -> MetricsReport {
        self.report
    }
}
