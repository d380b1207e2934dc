//! Criterion benchmarks for the QUSO annealer.
//!
//! Uses synthetic 2D lattices with random ±J couplings so the numbers
//! reflect the per-update cost of the Metropolis loop.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_quso::random::{create_rng, random_state};
use u_quso::sa::{AnnealConfig, AnnealRunner, CoolingSchedule, UpdateOrder};
use u_quso::{Coupling, SpinGraph};

// ===========================================================================
// Periodic L x L lattice, symmetric ±1 couplings
// ===========================================================================

fn lattice(side: usize, seed: u64) -> SpinGraph {
    let n = side * side;
    let mut rng = create_rng(seed);
    let mut adjacency = vec![Vec::new(); n];
    for r in 0..side {
        for c in 0..side {
            let i = r * side + c;
            for j in [r * side + (c + 1) % side, ((r + 1) % side) * side + c] {
                let w = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                adjacency[i].push(Coupling::new(j, w));
                adjacency[j].push(Coupling::new(i, w));
            }
        }
    }
    let bias = (0..n).map(|_| rng.random_range(-0.1..0.1)).collect();
    SpinGraph::from_adjacency(bias, adjacency).expect("lattice is well formed")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_anneal_lattice(c: &mut Criterion) {
    let mut group = c.benchmark_group("anneal_lattice");
    group.sample_size(10);

    for &side in &[8usize, 16, 32] {
        let n = side * side;
        let graph = lattice(side, 42);
        let initial = random_state(n, &mut create_rng(7));
        let schedule = CoolingSchedule::Geometric.schedule(3.0, 0.05, 100, n);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(graph, initial, schedule),
            |b, (g, s0, sch)| {
                b.iter(|| {
                    let state = AnnealRunner::anneal(black_box(g), black_box(s0), sch, 42);
                    black_box(state)
                })
            },
        );
    }
    group.finish();
}

fn bench_sequential_sweeps(c: &mut Criterion) {
    let mut group = c.benchmark_group("anneal_sequential");
    group.sample_size(10);

    let side = 16;
    let graph = lattice(side, 3);
    let config = AnnealConfig::default()
        .with_anneal_duration(100)
        .with_order(UpdateOrder::Sequential)
        .with_seed(42);
    group.bench_function("lattice_256", |b| {
        b.iter(|| {
            let results = AnnealRunner::run(black_box(&graph), black_box(&config));
            black_box(results)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_anneal_lattice, bench_sequential_sweeps);
criterion_main!(benches);
