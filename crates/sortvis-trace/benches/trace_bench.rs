//! Benchmarks for trace generation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, SeedableRng};
use sortvis_trace::{generate, random_array, ArrayConfig, Verbosity};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for &size in &[8usize, 16, 32, 64] {
        let config = ArrayConfig { size, ..Default::default() };
        let input = random_array(&config, &mut StdRng::seed_from_u64(42)).unwrap();

        for verbosity in [Verbosity::Fine, Verbosity::Grouped] {
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", verbosity), size),
                &input,
                |b, input| b.iter(|| generate(black_box(input), verbosity)),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
