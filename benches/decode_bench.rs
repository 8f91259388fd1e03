//! Decoder performance benchmarks.
//!
//! Benchmarks the two hot paths: raw instruction stream decoding and whole
//! classfile parsing over synthetic inputs.
//!
//! Run with: cargo bench --bench decode_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sextant::classfile;
use sextant::classfile::instruction::InstructionIter;
use sextant::graph::{CodeDependencyCollector, ComprehensiveCriteria, NodeFactory};

/// A realistic-ish bytecode mix: loads, arithmetic, a branch, a switch.
fn synthetic_code(target_len: usize) -> Vec<u8> {
    let mut code = Vec::with_capacity(target_len + 32);
    while code.len() < target_len {
        code.extend_from_slice(&[0x1a, 0x1b, 0x60, 0x3c]); // iload_0 iload_1 iadd istore_1
        code.extend_from_slice(&[0x10, 0x2a]); // bipush 42
        code.extend_from_slice(&[0x9a, 0x00, 0x03]); // ifne +3
        code.push(0x00); // nop
    }
    code.push(0xb1); // return
    code
}

/// Minimal classfile: magic, version, four pool entries, one empty class.
fn synthetic_classfile() -> Vec<u8> {
    // Pool layout: Utf8@1, Class@2 -> 1, Utf8@3, Class@4 -> 3.
    let mut pool = Vec::new();
    for (utf8_index, name) in [(1u16, "com/bench/Sample"), (3u16, "java/lang/Object")] {
        pool.push(1);
        pool.extend_from_slice(&(name.len() as u16).to_be_bytes());
        pool.extend_from_slice(name.as_bytes());
        pool.push(7);
        pool.extend_from_slice(&utf8_index.to_be_bytes());
    }
    let mut out = Vec::new();
    out.extend_from_slice(&0xCAFE_BABEu32.to_be_bytes());
    out.extend_from_slice(&[0, 0, 0, 52]);
    out.extend_from_slice(&5u16.to_be_bytes());
    out.extend_from_slice(&pool);
    out.extend_from_slice(&0x0021u16.to_be_bytes()); // access flags
    out.extend_from_slice(&2u16.to_be_bytes()); // this
    out.extend_from_slice(&4u16.to_be_bytes()); // super
    out.extend_from_slice(&0u16.to_be_bytes()); // interfaces
    out.extend_from_slice(&0u16.to_be_bytes()); // fields
    out.extend_from_slice(&0u16.to_be_bytes()); // methods
    out.extend_from_slice(&0u16.to_be_bytes()); // attributes
    out
}

fn benchmark_instruction_decoding(c: &mut Criterion) {
    let code = synthetic_code(64 * 1024);
    let mut group = c.benchmark_group("instruction_decode");
    group.throughput(Throughput::Bytes(code.len() as u64));
    group.bench_function("64k_stream", |b| {
        b.iter(|| {
            let mut count = 0usize;
            for instruction in InstructionIter::new(black_box(&code)) {
                let instruction = instruction.unwrap();
                count += instruction.length();
            }
            black_box(count)
        })
    });
    group.finish();
}

fn benchmark_classfile_parse(c: &mut Criterion) {
    let bytes = synthetic_classfile();
    c.bench_function("parse_minimal_classfile", |b| {
        b.iter(|| classfile::parse(black_box(&bytes)).unwrap())
    });
}

fn benchmark_collection(c: &mut Criterion) {
    let bytes = synthetic_classfile();
    let classfile = classfile::parse(&bytes).unwrap();
    c.bench_function("collect_minimal_classfile", |b| {
        b.iter(|| {
            let mut factory = NodeFactory::new();
            CodeDependencyCollector::new(&mut factory, &ComprehensiveCriteria)
                .collect(black_box(&classfile))
                .unwrap();
            black_box(factory.len())
        })
    });
}

criterion_group!(
    benches,
    benchmark_instruction_decoding,
    benchmark_classfile_parse,
    benchmark_collection
);
criterion_main!(benches);
