//! Benchmarks for the per-frame cost of the built-in effects.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use particlefx::{EffectKind, ParticleEmitter, Pixmap, RecordingSurface, Surface};

const WIDTH: u32 = 1080;
const HEIGHT: u32 = 1920;

fn bench_linked_web_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("linked_web_frame");

    for count in [10usize, 25, 50] {
        group.bench_with_input(BenchmarkId::new("recording", count), &count, |b, &count| {
            let mut effect = EffectKind::LinkedWeb.build_seeded(42);
            effect.seed_particles(WIDTH, HEIGHT, 5, 10, count);
            let mut surface = RecordingSurface::new(WIDTH, HEIGHT);
            b.iter(|| {
                surface.clear_commands();
                effect.draw_frame(&mut surface, WIDTH, HEIGHT, black_box(true), count);
                black_box(surface.commands().len())
            })
        });
    }

    group.finish();
}

fn bench_effects_rasterized(c: &mut Criterion) {
    let mut group = c.benchmark_group("effect_frame_pixmap");
    group.sample_size(20);

    for kind in EffectKind::ALL {
        group.bench_function(kind.name(), |b| {
            let mut effect = kind.build_seeded(7);
            effect.seed_particles(320, 240, 5, 10, 50);
            let mut pixmap = Pixmap::new(320, 240);
            b.iter(|| {
                pixmap.clear(particlefx::Color::BLACK);
                effect.draw_frame(&mut pixmap, 320, 240, true, 50);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_linked_web_frame, bench_effects_rasterized);
criterion_main!(benches);
