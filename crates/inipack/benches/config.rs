//! Benchmark – `inipack::Config` construction and lookups
#![allow(missing_docs)]

use std::{fmt::Write, hint::black_box};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use inipack::Config;

/// A deterministic document with `sections` sections of `keys` entries each.
fn make_ini_payload(sections: usize, keys: usize) -> String {
    let mut s = String::from("; generated\nroot = top level value\n\n");
    for section in 0..sections {
        writeln!(s, "[section_{section}]").unwrap();
        for key in 0..keys {
            writeln!(s, "  key_{key} = value {section}.{key}  ").unwrap();
        }
        s.push('\n');
    }
    s
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("config_parse");

    for &(sections, keys) in &[(1usize, 10usize), (10, 10), (100, 50)] {
        let payload = make_ini_payload(sections, keys);
        let id = BenchmarkId::from_parameter(format!("{sections}x{keys}"));
        group.bench_with_input(id, &payload, |b, payload| {
            b.iter(|| {
                let config = Config::parse(black_box(payload)).unwrap();
                black_box(config.len());
            });
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let payload = make_ini_payload(100, 50);
    let config = Config::parse(&payload).unwrap();

    let mut group = c.benchmark_group("config_lookup");
    group.bench_function("global_first", |b| {
        b.iter(|| black_box(config.get(black_box("root"))));
    });
    group.bench_function("global_last", |b| {
        b.iter(|| black_box(config.get(black_box("key_49"))));
    });
    group.bench_function("section_last", |b| {
        b.iter(|| black_box(config.get_in(black_box("section_99"), black_box("key_49"))));
    });
    group.bench_function("typed_missing", |b| {
        b.iter(|| black_box(config.get_in_as::<u64>(black_box("section_50"), black_box("nope"))));
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_lookup);
criterion_main!(benches);
