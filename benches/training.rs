use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use petalmap::dataset::LabeledPoint;
use petalmap::geometry::{BoundaryGeometry, Viewport};
use petalmap::ml::SoftmaxClassifier;

const POINT_COUNT: usize = 150;

fn synthetic_points() -> Vec<LabeledPoint> {
    (0..POINT_COUNT)
        .map(|i| {
            let label = i % 3;
            let t = (i / 3) as f32 / (POINT_COUNT / 3) as f32;
            let center = [-0.7, 0.0, 0.7][label];
            LabeledPoint::new(center + (t - 0.5) * 0.3, center * 0.8 + (0.5 - t) * 0.2, label)
        })
        .collect()
}

fn bench_train_epoch(c: &mut Criterion) {
    let points = synthetic_points();
    let mut classifier = SoftmaxClassifier::default();
    classifier.randomize_seeded(42);
    c.bench_with_input(
        BenchmarkId::new("train_epoch", POINT_COUNT),
        &points,
        |b, points| {
            b.iter(|| classifier.train_epoch(black_box(points)));
        },
    );
}

fn bench_boundary_geometry(c: &mut Criterion) {
    let mut classifier = SoftmaxClassifier::default();
    classifier.randomize_seeded(7);
    let weights = *classifier.weights();
    c.bench_function("boundary_geometry", |b| {
        b.iter(|| BoundaryGeometry::compute(black_box(&weights), &Viewport::UNIT));
    });
}

fn bench_probability_grid(c: &mut Criterion) {
    let mut classifier = SoftmaxClassifier::default();
    classifier.randomize_seeded(9);
    let resolution = 80usize;
    c.bench_with_input(
        BenchmarkId::new("probability_grid", resolution),
        &resolution,
        |b, &resolution| {
            b.iter(|| {
                let step = 2.0 / resolution as f32;
                let mut acc = 0.0f32;
                for iy in 0..resolution {
                    for ix in 0..resolution {
                        let x = -1.0 + (ix as f32 + 0.5) * step;
                        let y = -1.0 + (iy as f32 + 0.5) * step;
                        acc += classifier.predict_probs(x, y)[0];
                    }
                }
                black_box(acc)
            });
        },
    );
}

criterion_group!(
    benches,
    bench_train_epoch,
    bench_boundary_geometry,
    bench_probability_grid
);
criterion_main!(benches);
