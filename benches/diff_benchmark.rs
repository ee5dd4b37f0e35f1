//! Benchmarks for tree building, diffing and baselining.
//!
//! Run with: cargo bench --bench diff_benchmark

use api_baseline::baseline::Baseliner;
use api_baseline::config::PolicyConfig;
use api_baseline::policy::facts::{MethodFacts, TypeFacts, TypeKind};
use api_baseline::snapshot::{Snapshot, UnitFacts};
use api_baseline::Diff;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

/// Generate a snapshot with `units` packages of ten types each.
///
/// Every seventh type of the newer release gains a method.
fn generate_snapshot(version: &str, units: usize, newer: bool) -> Snapshot {
    let mut types = Vec::with_capacity(units * 10);
    let mut unit_facts = Vec::with_capacity(units);

    for u in 0..units {
        let package = format!("com.example.unit{u}");
        unit_facts.push(UnitFacts {
            name: package.clone(),
            version: Some(version.to_string()),
            attributes: Default::default(),
        });

        for t in 0..10 {
            let kind = if t % 3 == 0 {
                TypeKind::Interface
            } else {
                TypeKind::Class
            };
            let mut facts = TypeFacts::new(format!("{package}.Type{t}"), kind);
            facts.methods = (0..8)
                .map(|m| {
                    let mut method = MethodFacts::new(format!("op{m}"));
                    method.parameters = vec!["int".to_string(); m % 3];
                    method
                })
                .collect();
            if newer && (u * 10 + t) % 7 == 0 {
                facts.methods.push(MethodFacts::new("added"));
            }
            types.push(facts);
        }
    }

    Snapshot {
        identity: "com.example.bench".to_string(),
        version: Some(version.to_string()),
        units: unit_facts,
        types,
        resources: Default::default(),
        headers: Default::default(),
    }
}

fn benchmark_build(c: &mut Criterion) {
    let policy = PolicyConfig::default();
    let mut group = c.benchmark_group("build_tree");

    for units in [10, 100] {
        let snapshot = generate_snapshot("1.0.0", units, false);
        group.bench_with_input(BenchmarkId::from_parameter(units), &snapshot, |b, snapshot| {
            b.iter(|| black_box(snapshot.to_element(&policy)));
        });
    }
    group.finish();
}

fn benchmark_diff(c: &mut Criterion) {
    let policy = PolicyConfig::default();
    let mut group = c.benchmark_group("diff");

    for units in [10, 100] {
        let older = generate_snapshot("1.0.0", units, false).to_element(&policy);
        let newer = generate_snapshot("1.1.0", units, true).to_element(&policy);
        group.bench_with_input(
            BenchmarkId::from_parameter(units),
            &(newer, older),
            |b, (newer, older)| {
                b.iter(|| black_box(Diff::new(newer, older).map(|diff| diff.delta())));
            },
        );
    }
    group.finish();
}

fn benchmark_baseline(c: &mut Criterion) {
    let policy = PolicyConfig::default();
    let mut group = c.benchmark_group("baseline");

    for units in [10, 100] {
        let older = generate_snapshot("1.0.0", units, false);
        let newer = generate_snapshot("1.1.0", units, true);
        let (older_meta, newer_meta) = (older.metadata(), newer.metadata());
        let (older_tree, newer_tree) = (older.to_element(&policy), newer.to_element(&policy));
        let Ok(diff) = Diff::new(&newer_tree, &older_tree) else {
            continue;
        };
        let baseliner = Baseliner::default();

        group.bench_function(BenchmarkId::from_parameter(units), |b| {
            b.iter(|| {
                let result = baseliner.baseline(&diff, &newer_meta, Some(&older_meta));
                black_box(result.has_mismatch())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_diff, benchmark_baseline);
criterion_main!(benches);
