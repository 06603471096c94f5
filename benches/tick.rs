//! Full-tick benchmarks at realistic particle counts.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, Criterion};
use lumafield::prelude::*;
use lumafield::source::gradient_frame;

fn bench_flat_field(c: &mut Criterion) {
    // 1280x720 at gap 8: 25,600 particles, flow field on, no connections.
    let mut sim = Simulation::new(1280, 720)
        .with_style(StylePreset::StarryNight.config())
        .with_fixed_delta(1.0 / 60.0)
        .with_seed(7);
    let source = StillSource::new(gradient_frame(1280, 720));
    let mut surface = RecordingSurface::new();

    c.bench_function("tick_flat_25k", |b| {
        b.iter(|| {
            surface.clear();
            sim.tick(&source, &mut surface)
        })
    });
}

fn bench_connected_field(c: &mut Criterion) {
    // Constellation look: sparser lattice, spatial hash + connection pass.
    let mut sim = Simulation::new(1280, 720)
        .with_style(StylePreset::Constellation.config())
        .with_fixed_delta(1.0 / 60.0)
        .with_seed(7);
    let source = StillSource::new(gradient_frame(1280, 720));
    let mut surface = RecordingSurface::new();

    c.bench_function("tick_connected", |b| {
        b.iter(|| {
            surface.clear();
            sim.tick(&source, &mut surface)
        })
    });
}

fn bench_depth_field(c: &mut Criterion) {
    let mut sim = Simulation::new(1280, 720)
        .with_style(StylePreset::Nebula.config())
        .with_fixed_delta(1.0 / 60.0)
        .with_seed(7);
    let source = StillSource::new(gradient_frame(1280, 720));
    let mut surface = RecordingSurface::new();

    c.bench_function("tick_depth", |b| {
        b.iter(|| {
            surface.clear();
            sim.tick(&source, &mut surface)
        })
    });
}

criterion_group!(benches, bench_flat_field, bench_connected_field, bench_depth_field);
criterion_main!(benches);
