//! Benchmark for land noise and palette bucketing.
//!
//! Run with: cargo bench --package nebula_procedural --bench noise_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use nebula_procedural::{HeightSource, LandMap, PaletteBook, Seed, SimplexNoise};
use nebula_shared::PaletteConfig;

fn benchmark_single_sample(c: &mut Criterion) {
    let noise = SimplexNoise::new(Seed::new(42));

    c.bench_function("single_noise_sample", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.sample(black_box(x), black_box(x * 0.7)))
        });
    });
}

fn benchmark_height_at(c: &mut Criterion) {
    let noise = SimplexNoise::new(Seed::new(42)).with_octaves(6);

    c.bench_function("height_at_6_octaves", |b| {
        let mut x = 0i32;
        b.iter(|| {
            x = x.wrapping_add(1);
            black_box(noise.height_at(black_box(x), black_box(x / 3)))
        });
    });
}

fn benchmark_land_view(c: &mut Criterion) {
    let noise = SimplexNoise::new(Seed::new(42));
    let book = PaletteBook::from_config(&PaletteConfig::builtin());

    let mut group = c.benchmark_group("land_view");
    group.throughput(Throughput::Elements(400 * 400));
    group.sample_size(10);

    group.bench_function("sample_and_render_400x400", |b| {
        b.iter(|| {
            let map = LandMap::sample(&noise, 400, 400);
            if let Some(palette) = book.choose(Seed::new(7)) {
                black_box(map.render(palette));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_sample, benchmark_height_at, benchmark_land_view);
criterion_main!(benches);
