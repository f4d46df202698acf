use criterion::{black_box, criterion_group, criterion_main, Criterion};
use schoolmap::{haversine_km, rank, School};

/// Generate `n` schools spread over the globe on a deterministic grid.
fn schools(n: usize) -> Vec<School> {
    (0..n)
        .map(|i| {
            let frac = i as f64 / n as f64;
            School {
                id: i as u64 + 1,
                name: format!("School {i}"),
                address: format!("{i} Main St"),
                latitude: -80.0 + ((i * 37) % 160) as f64 + frac,
                longitude: -179.0 + ((i * 53) % 358) as f64 + frac,
            }
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    c.bench_function("haversine_single", |b| {
        b.iter(|| {
            black_box(haversine_km(
                black_box(51.5074),
                black_box(-0.1278),
                black_box(48.8566),
                black_box(2.3522),
            ));
        });
    });
}

fn bench_rank_1000(c: &mut Criterion) {
    let records = schools(1000);

    c.bench_function("rank_1000", |b| {
        b.iter(|| {
            black_box(rank(black_box(51.5074), black_box(-0.1278), records.clone()));
        });
    });
}

fn bench_rank_10000(c: &mut Criterion) {
    let records = schools(10_000);

    c.bench_function("rank_10000", |b| {
        b.iter(|| {
            black_box(rank(black_box(35.6762), black_box(139.6503), records.clone()));
        });
    });
}

criterion_group!(
    benches,
    bench_single_distance,
    bench_rank_1000,
    bench_rank_10000,
);
criterion_main!(benches);
