//! Benchmarks for subgraph sampling and seed-set scoring.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use linksim::{
    sample_subgraph, score, RawNodeId, SamplerConfig, SimilarityRequest, Subgraph,
};
use rand::prelude::*;
use rand::SeedableRng;
use std::hint::black_box;

/// Preferential attachment edge list (Barabási–Albert) with `m` edges per new node.
///
/// Heavy-tailed degrees, closer to a real link graph than a ring or grid.
fn barabasi_albert(n: u64, m: usize, seed: u64) -> Vec<(RawNodeId, RawNodeId)> {
    assert!(n as usize >= m.max(2));
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::new();

    // Start with a clique of size m+1.
    let init = m as u64 + 1;
    let mut targets: Vec<u64> = Vec::new(); // node ids repeated by degree
    for i in 0..init {
        for j in (i + 1)..init {
            edges.push((i, j));
            targets.push(i);
            targets.push(j);
        }
    }

    for v in init..n {
        let mut chosen: Vec<u64> = Vec::with_capacity(m);
        while chosen.len() < m {
            let u = targets[rng.random_range(0..targets.len())];
            if u != v && !chosen.contains(&u) {
                chosen.push(u);
            }
        }
        for &u in &chosen {
            // link direction is arbitrary in the source; sampling symmetrizes it
            edges.push((v, u));
            targets.push(u);
            targets.push(v);
        }
    }
    edges
}

fn names(n: u64) -> Vec<(RawNodeId, String)> {
    (0..n).map(|i| (i, format!("Article {i}"))).collect()
}

fn sampled(n: u64, fraction: f64) -> Subgraph {
    let config = SamplerConfig {
        subgraph_fraction: fraction,
        id_space: n,
        fixed: [0, 1].into_iter().collect(),
        ..SamplerConfig::default()
    };
    sample_subgraph(&barabasi_albert(n, 4, 123), &names(n), &config)
        .expect("benchmark sample")
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    for n in [10_000u64, 100_000] {
        let edges = barabasi_albert(n, 4, 123);
        let names = names(n);
        let config = SamplerConfig {
            subgraph_fraction: 0.05,
            id_space: n,
            fixed: [0, 1, 2].into_iter().collect(),
            ..SamplerConfig::default()
        };
        group.bench_with_input(BenchmarkId::new("ba_m4/fraction_5pct", n), &n, |b, _| {
            b.iter(|| {
                let g = sample_subgraph(black_box(&edges), black_box(&names), &config);
                black_box(g)
            })
        });
    }
    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");
    // Sample densely so the subgraph keeps enough edges to be interesting.
    for n in [5_000u64, 20_000] {
        let g = sampled(n, 0.5);
        for seeds in [1usize, 4, 16] {
            let ids: Vec<usize> = (0..seeds).collect();
            let req = SimilarityRequest::new(ids, 10);
            group.bench_with_input(
                BenchmarkId::new(format!("seeds_{seeds}"), g.len()),
                &seeds,
                |b, _| b.iter(|| black_box(score(black_box(&g), black_box(&req)))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_sampling, bench_scoring);
criterion_main!(benches);
