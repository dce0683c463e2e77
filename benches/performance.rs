// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for AFROCHORD
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Chord pool resolution
//! - Melody generation
//! - Track assembly and MIDI encoding
//! - The full request pipeline

use afrochord::export::{MidiExporter, TrackAssembler};
use afrochord::generators::{select_progression, MelodyGenerator};
use afrochord::music::{ChordPool, Key};
use afrochord::Session;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_chord_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("chord_pool");

    for (root, scale) in [("C", "major"), ("F#", "minor"), ("Bb", "major")] {
        group.bench_with_input(
            BenchmarkId::new("resolve", format!("{} {}", root, scale)),
            &(root, scale),
            |b, &(root, scale)| {
                b.iter(|| {
                    let key = Key::parse(black_box(root), black_box(scale)).unwrap();
                    black_box(ChordPool::from_scale(key.scale()))
                })
            },
        );
    }

    group.finish();
}

fn bench_melody(c: &mut Criterion) {
    let mut group = c.benchmark_group("melody");
    let key = Key::parse("A", "minor").unwrap();
    let generator = MelodyGenerator::default();

    for bars in [4u32, 16, 64].iter() {
        group.bench_with_input(BenchmarkId::new("generate", bars), bars, |b, &bars| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| black_box(generator.generate(&key, bars, &mut rng)))
        });
    }

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let key = Key::parse("C", "major").unwrap();
    let pool = ChordPool::from_scale(key.scale()).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let progression = select_progression(&pool, &mut rng);
    let melody = MelodyGenerator::default().generate(&key, 4, &mut rng);
    let assembler = TrackAssembler::default();
    let exporter = MidiExporter::new();

    c.bench_function("assemble_track", |b| {
        b.iter(|| black_box(assembler.assemble(&progression, &melody, &mut rng)))
    });

    let track = assembler.assemble(&progression, &melody, &mut rng);
    c.bench_function("encode_smf", |b| {
        b.iter(|| black_box(exporter.export_to_bytes(&track).unwrap()))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    c.bench_function("generate_request", |b| {
        let mut session = Session::default();
        let mut rng = StdRng::seed_from_u64(3);
        b.iter(|| black_box(session.generate(black_box("G minor"), &mut rng).unwrap()))
    });
}

criterion_group!(benches, bench_chord_pool, bench_melody, bench_export, bench_pipeline);
criterion_main!(benches);
