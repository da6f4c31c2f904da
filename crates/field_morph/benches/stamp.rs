mod common;

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use field_morph::field::Field;
use glam::Vec2;

const SIZES: [u32; 3] = [64, 256, 512];

const DISCS: [(Vec2, f32); 3] = [
    (Vec2::new(-0.4, -0.4), 0.5),
    (Vec2::new(0.3, 0.2), 0.35),
    (Vec2::new(0.0, 0.5), 0.6),
];

fn stamp_disc_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("field/stamp_disc");

    for &size in &SIZES {
        group.throughput(common::texels_throughput(size));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut field = Field::new(size, size);
                for (center, radius) in DISCS {
                    field.stamp_disc(center, radius);
                }
                black_box(field.samples().len());
            });
        });
    }

    group.finish();
}

criterion::criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = stamp_disc_benches
}
criterion::criterion_main!(benches);
