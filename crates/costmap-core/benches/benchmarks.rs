use costmap_core::prelude::*;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn synthetic(n: usize) -> (Vec<BoundaryFeature>, Vec<CountryRecord>) {
    let features = (0..n)
        .map(|i| BoundaryFeature::new(format!("Country {i}"), ""))
        .collect();
    let rows = (0..n)
        .filter(|i| i % 7 != 0)
        .map(|i| {
            let x = i as f64;
            CountryRecord::new(
                format!("Country {i}"),
                Indices::new(Some(20.0 + x % 120.0), Some(5.0 + x % 150.0), Some(x % 140.0)),
            )
        })
        .collect();
    (features, rows)
}

fn bench_join(c: &mut Criterion) {
    let (features, rows) = synthetic(250);
    c.bench_function("join 250 countries", |b| {
        b.iter(|| {
            let mut f = features.clone();
            black_box(join(&mut f, black_box(&rows)))
        })
    });
}

fn bench_scale(c: &mut Criterion) {
    let (features, rows) = synthetic(250);
    let ds = Dataset::from_parts(features, rows).expect("synthetic names are unique");
    let config = ScaleConfig::default();
    c.bench_function("quantile scale + fills", |b| {
        b.iter(|| {
            let scale = ds.color_scale(Metric::Cost, &config).expect("default config is valid");
            ds.features()
                .iter()
                .map(|f| scale.color_for(f.value(Metric::Cost)))
                .count()
        })
    });
}

fn bench_regression(c: &mut Criterion) {
    let points: Vec<Point> = (0..250)
        .map(|i| Point::new(i as f64, 0.4 * i as f64 + (i % 13) as f64))
        .collect();
    c.bench_function("linear regression 250 points", |b| {
        b.iter(|| linear_regression(black_box(&points)))
    });
}

criterion_group!(benches, bench_join, bench_scale, bench_regression);
criterion_main!(benches);
