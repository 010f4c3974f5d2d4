use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use indpoly::prelude::*;
use indpoly::utils::random_tree;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_populate(c: &mut Criterion) {
    let mut group = c.benchmark_group("populate");
    group.sample_size(10);

    for max_order in [7, 9] {
        group.bench_with_input(BenchmarkId::new("parallel", max_order), &max_order, |b, &max| {
            b.iter(|| {
                let mut store = MemoryStore::new();
                Orchestrator::new(&mut store, PopulateConfig::full(max).quiet()).run().unwrap();
                store.len()
            })
        });
        group.bench_with_input(BenchmarkId::new("sequential", max_order), &max_order, |b, &max| {
            b.iter(|| {
                let mut store = MemoryStore::new();
                Orchestrator::new(&mut store, PopulateConfig::full(max).quiet().sequential())
                    .run()
                    .unwrap();
                store.len()
            })
        });
    }
    group.finish();
}

fn bench_reduce_random(c: &mut Criterion) {
    let mut store = MemoryStore::new();
    Orchestrator::new(&mut store, PopulateConfig::full(9).quiet()).run().unwrap();
    let mut canonicalizer = Canonicalizer::new();
    canonicalizer.prepare(9).unwrap();
    let algebra = PolynomialAlgebra::default();
    let reducer = Reducer::new(&canonicalizer, &store, &algebra);

    let mut rng = StdRng::seed_from_u64(7);
    let trees: Vec<Tree> = (0..32).map(|_| random_tree(10, &mut rng).unwrap()).collect();

    c.bench_function("reduce_order_10", |b| {
        b.iter(|| {
            for tree in &trees {
                reducer.reduce(tree).unwrap();
            }
        })
    });
}

criterion_group!(benches, bench_populate, bench_reduce_random);
criterion_main!(benches);
