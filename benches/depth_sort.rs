//! Benchmarks for the CPU side of the frame: update and draw-list assembly.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use whoosh::{EmitterConfig, ParticleEmitterSystem};

fn overfull_system() -> ParticleEmitterSystem {
    let mut system =
        ParticleEmitterSystem::with_seed(Vec3::ZERO, EmitterConfig::default(), 0xbe11);
    // 300 live particles, past the 200-point draw capacity.
    system.update(15_000, 0, Vec3::ZERO);
    for _ in 0..5 {
        system.update(0, 10, Vec3::ZERO);
    }
    system.set_camera(Vec3::ZERO, Vec3::new(0.4, 1.1, 2.7));
    system
}

fn bench_draw_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_list");

    group.bench_function("sort_200_of_300", |b| {
        let mut system = overfull_system();
        b.iter(|| {
            let list = system.draw_list();
            black_box(list.count())
        })
    });

    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    group.bench_function("quiet_tick_300", |b| {
        let mut system = overfull_system();
        // Phase 10 ms never crosses a spawn interval, so this measures
        // advance-and-reap alone. Lifespans refill via the occasional
        // large-frame respawn below the measurement loop's noise floor.
        b.iter(|| {
            system.update(0, 10, Vec3::ZERO);
            if system.particle_count() < 100 {
                system.update(15_000, 0, Vec3::ZERO);
            }
            black_box(system.particle_count())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_draw_list, bench_update);
criterion_main!(benches);
