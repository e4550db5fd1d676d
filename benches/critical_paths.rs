//! Criterion benchmarks for petgen critical paths
//!
//! - Import: parsing an interaction document into a registry
//! - Codegen: compiling a registry into the client controller
//! - Runtime: replaying an event script

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use petgen::codegen::{ClientCodeGenerator, CodegenOptions};
use petgen::defaults::default_interactions;
use petgen::runtime::{parse_script, PetRuntime};
use petgen::InteractionRegistry;

/// Registry with `n` interactions, cycling through the default set.
fn make_registry(n: usize) -> InteractionRegistry {
    let defaults = default_interactions();
    (0..n)
        .map(|i| {
            let mut interaction = defaults[i % defaults.len()].clone();
            interaction.name = format!("{}_{}", interaction.name, i);
            interaction
        })
        .collect()
}

fn bench_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("import");
    for n in [6, 60, 600] {
        let json = make_registry(n).to_json(false).expect("serialize registry");
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &json, |b, json| {
            b.iter(|| {
                let mut registry = InteractionRegistry::new();
                registry.import_json(black_box(json)).expect("import");
                registry
            })
        });
    }
    group.finish();
}

fn bench_codegen(c: &mut Criterion) {
    let generator = ClientCodeGenerator::new(CodegenOptions::default());
    let mut group = c.benchmark_group("codegen");
    for n in [6, 60, 600] {
        let registry = make_registry(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &registry, |b, registry| {
            b.iter(|| generator.generate(black_box(registry)))
        });
    }
    group.finish();
}

fn bench_runtime(c: &mut Criterion) {
    let registry = make_registry(60);
    let script: String = (0..200)
        .map(|i| {
            let event = ["click", "mousedown", "mousemove", "mouseup", "mouseenter"][i % 5];
            format!("{}@{}", event, i * 100)
        })
        .collect::<Vec<_>>()
        .join(",");
    let steps = parse_script(&script).expect("valid script");

    c.bench_function("runtime/replay_200_events", |b| {
        b.iter(|| PetRuntime::new(&registry).run_script(black_box(&steps)))
    });
}

criterion_group!(benches, bench_import, bench_codegen, bench_runtime);
criterion_main!(benches);
