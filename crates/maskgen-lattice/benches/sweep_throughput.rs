use criterion::{black_box, criterion_group, criterion_main, Criterion};
use maskgen_core::{Engine, LinearSize, ModelParameter};
use maskgen_lattice::{IsingEngine, PercolationEngine};

fn sweep_bench(c: &mut Criterion) {
    let size = LinearSize::new(64).unwrap();

    let mut ising = IsingEngine::construct(42, size, ModelParameter::Default).unwrap();
    c.bench_function("ising_sweep_64", |b| {
        b.iter(|| {
            ising.advance().unwrap();
            black_box(ising.magnetization());
        })
    });

    let mut percolation = PercolationEngine::construct(42, size, ModelParameter::Default).unwrap();
    c.bench_function("percolation_draw_64", |b| {
        b.iter(|| {
            percolation.advance().unwrap();
            black_box(percolation.max_size());
        })
    });
}

criterion_group!(benches, sweep_bench);
criterion_main!(benches);
