//! Benchmarks for the CPU frame pass.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use voidfield::frame::{evaluate_into, evaluate_particle, FrameUniforms, ParticleOutput};
use voidfield::{Formation, SeedGenerator};

fn bench_formations(c: &mut Criterion) {
    let mut group = c.benchmark_group("formation_position");
    let offset = Vec3::new(0.37, 0.61, 0.83);

    for formation in Formation::ALL {
        group.bench_function(formation.name(), |b| {
            b.iter(|| black_box(formation.position(black_box(offset), 12.5, 0.3)))
        });
    }

    group.finish();
}

fn bench_particle_kernel(c: &mut Criterion) {
    let seeds = SeedGenerator::default().generate_with(1, &mut SmallRng::seed_from_u64(3));
    let seed = seeds.get(0);

    let settled = FrameUniforms::default();
    let blending = FrameUniforms {
        previous: Formation::Cosmic,
        current: Formation::Orbit,
        blend: 0.5,
        birth_progress: 0.6,
        ..Default::default()
    };

    c.bench_function("evaluate_particle/settled", |b| {
        b.iter(|| black_box(evaluate_particle(black_box(&seed), &settled)))
    });
    c.bench_function("evaluate_particle/blending", |b| {
        b.iter(|| black_box(evaluate_particle(black_box(&seed), &blending)))
    });
}

fn bench_frame_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_into");
    group.sample_size(20);

    for count in [10_000usize, 30_000, 100_000] {
        let seeds = SeedGenerator::default().generate_with(count, &mut SmallRng::seed_from_u64(7));
        let mut out = vec![ParticleOutput::default(); count];
        let u = FrameUniforms {
            previous: Formation::Default,
            current: Formation::Pulse,
            blend: 0.4,
            time: 8.0,
            ..Default::default()
        };

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| evaluate_into(&seeds, &u, black_box(&mut out)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_formations, bench_particle_kernel, bench_frame_pass);
criterion_main!(benches);
